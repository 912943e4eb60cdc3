//! Command Tests
//!
//! Tests verify:
//! - Exact command lines for every command family
//! - Argument validation happens at construction
//! - The response contract attached to each family

use proxysock::protocol::{
    at_most_one, AdminState, Command, CommandBuilder, Health, RateLimitTarget, ResponseContract,
    ServerSelector,
};
use proxysock::ProxyError;

fn selector() -> ServerSelector {
    ServerSelector::new("web", "srv1").unwrap()
}

// =============================================================================
// Server Selector Tests
// =============================================================================

#[test]
fn test_selector_renders_backend_slash_server() {
    let pairs = [("web", "srv1"), ("b", "s"), ("api-v2", "node_03"), ("be.1", "10.0.0.1")];
    for (backend, server) in pairs {
        let sel = ServerSelector::new(backend, server).unwrap();
        assert_eq!(sel.to_string(), format!("{}/{}", backend, server));
        assert_eq!(sel.backend(), backend);
        assert_eq!(sel.server(), server);
    }
}

#[test]
fn test_selector_rejects_empty_backend() {
    let result = ServerSelector::new("", "srv1");
    assert!(matches!(result, Err(ProxyError::InvalidArgument(_))));
}

#[test]
fn test_selector_rejects_empty_server() {
    let result = ServerSelector::new("web", "");
    assert!(matches!(result, Err(ProxyError::InvalidArgument(_))));
}

// =============================================================================
// Enumerated Argument Tests
// =============================================================================

#[test]
fn test_health_values() {
    assert_eq!("up".parse::<Health>().unwrap(), Health::Up);
    assert_eq!("stopping".parse::<Health>().unwrap(), Health::Stopping);
    assert_eq!("down".parse::<Health>().unwrap(), Health::Down);
}

#[test]
fn test_health_rejects_other_values() {
    for value in ["", "UP", "maint", "ready", "healthy"] {
        match value.parse::<Health>() {
            Err(ProxyError::InvalidArgument(msg)) => {
                assert!(msg.contains("\"up\", \"stopping\" or \"down\""), "{}", msg);
            }
            other => panic!("Expected InvalidArgument for {:?}, got {:?}", value, other),
        }
    }
}

#[test]
fn test_admin_state_values() {
    assert_eq!("ready".parse::<AdminState>().unwrap(), AdminState::Ready);
    assert_eq!("drain".parse::<AdminState>().unwrap(), AdminState::Drain);
    assert_eq!("maint".parse::<AdminState>().unwrap(), AdminState::Maint);
}

#[test]
fn test_admin_state_rejects_other_values() {
    for value in ["", "up", "down", "Ready", "maintenance"] {
        match value.parse::<AdminState>() {
            Err(ProxyError::InvalidArgument(msg)) => {
                assert!(msg.contains("\"ready\", \"drain\" or \"maint\""), "{}", msg);
            }
            other => panic!("Expected InvalidArgument for {:?}, got {:?}", value, other),
        }
    }
}

#[test]
fn test_rate_limit_targets() {
    for value in ["connections", "http-compression", "sessions", "ssl-sessions"] {
        let target: RateLimitTarget = value.parse().unwrap();
        assert_eq!(target.as_str(), value);
    }
    assert!(matches!(
        "requests".parse::<RateLimitTarget>(),
        Err(ProxyError::InvalidArgument(_))
    ));
}

// =============================================================================
// Optional Argument Tests
// =============================================================================

#[test]
fn test_at_most_one() {
    let none: [&str; 0] = [];
    assert_eq!(at_most_one("port", &none).unwrap(), None);
    assert_eq!(at_most_one("port", &["80"]).unwrap(), Some("80"));

    match at_most_one("port", &["80", "81"]) {
        Err(ProxyError::InvalidArgument(msg)) => assert!(msg.contains("only 0 or 1 allowed")),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_builder_trims_and_joins() {
    let cmd = CommandBuilder::new("show stat")
        .arg("-1")
        .build(ResponseContract::Payload);
    assert_eq!(cmd.line(), "show stat -1");

    let empty: [String; 0] = [];
    let cmd = CommandBuilder::new("show env")
        .optional("name", &empty)
        .unwrap()
        .build(ResponseContract::Payload);
    assert_eq!(cmd.line(), "show env");
}

#[test]
fn test_builder_required_rejects_empty() {
    let result = CommandBuilder::new("shutdown session").required("id", "");
    assert!(matches!(result, Err(ProxyError::InvalidArgument(_))));
}

// =============================================================================
// Set Server Family Tests
// =============================================================================

#[test]
fn test_set_server_addr() {
    let none: [&str; 0] = [];
    let cmd = selector().addr("10.0.0.2", &none).unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 addr 10.0.0.2");
    assert_eq!(cmd.contract(), ResponseContract::ContainsMarkerIsSuccess("changed from"));

    let cmd = selector().addr("10.0.0.2", &["8080"]).unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 addr 10.0.0.2 port 8080");
}

#[test]
fn test_set_server_addr_rejects_two_ports() {
    let result = selector().addr("10.0.0.2", &["8080", "8081"]);
    assert!(matches!(result, Err(ProxyError::InvalidArgument(_))));
}

#[test]
fn test_set_server_agent() {
    assert_eq!(selector().agent(true).line(), "set server web/srv1 agent up");
    assert_eq!(selector().agent(false).line(), "set server web/srv1 agent down");
    assert_eq!(
        selector().agent(true).contract(),
        ResponseContract::ContainsMarkerIsSuccess("changed from")
    );
}

#[test]
fn test_set_server_agent_addr_and_send() {
    let cmd = selector().agent_addr("10.0.0.9").unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 agent-addr 10.0.0.9");
    assert_eq!(
        cmd.contract(),
        ResponseContract::ContainsAnyOfIsFailure(&["not enabled", "incorrect"])
    );

    let cmd = selector().agent_send("hello").unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 agent-send hello");
    assert_eq!(
        cmd.contract(),
        ResponseContract::ContainsAnyOfIsFailure(&["not enabled", "cannot"])
    );

    assert!(selector().agent_addr("").is_err());
    assert!(selector().agent_send("").is_err());
}

#[test]
fn test_set_server_health_state_weight() {
    assert_eq!(
        selector().health(Health::Stopping).line(),
        "set server web/srv1 health stopping"
    );
    assert_eq!(
        selector().state(AdminState::Maint).line(),
        "set server web/srv1 state maint"
    );
    let weight = selector().weight("50%").unwrap();
    assert_eq!(weight.line(), "set server web/srv1 weight 50%");
    assert_eq!(weight.contract(), ResponseContract::EmptyIsSuccess);
    assert!(selector().weight("").is_err());
}

#[test]
fn test_set_server_check_port_and_fqdn() {
    let cmd = selector().check_port("8081").unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 check-port 8081");
    assert_eq!(cmd.contract(), ResponseContract::ContainsMarkerIsSuccess("port updated"));

    let cmd = selector().fqdn("srv1.example.com").unwrap();
    assert_eq!(cmd.line(), "set server web/srv1 fqdn srv1.example.com");
    assert_eq!(cmd.contract(), ResponseContract::EmptyIsSuccess);
}

// =============================================================================
// Other Command Tests
// =============================================================================

#[test]
fn test_query_commands() {
    let none: [&str; 0] = [];
    let cases = [
        (Command::show_info(), "show info"),
        (Command::show_stat(), "show stat"),
        (Command::show_schema_json(), "show schema json"),
        (Command::show_sess(), "show sess"),
        (Command::show_backend(), "show backend"),
        (Command::show_cli_sockets(), "show cli sockets"),
        (Command::show_pools(), "show pools"),
        (Command::show_env(&none).unwrap(), "show env"),
        (Command::show_env(&["HOME"]).unwrap(), "show env HOME"),
        (Command::show_stat_resolvers(&none).unwrap(), "show stat resolvers"),
        (Command::show_stat_resolvers(&["dns1"]).unwrap(), "show stat resolvers dns1"),
        (Command::show_servers_state("web").unwrap(), "show servers state web"),
        (Command::get_weight(&selector()), "get weight web/srv1"),
    ];

    for (cmd, line) in cases {
        assert_eq!(cmd.line(), line);
        assert_eq!(cmd.contract(), ResponseContract::Payload, "{}", line);
    }
}

#[test]
fn test_mutation_commands() {
    let cases = [
        (Command::clear_counters(false), "clear counters"),
        (Command::clear_counters(true), "clear counters all"),
        (Command::set_maxconn_server(&selector(), 100), "set maxconn server web/srv1 100"),
        (Command::set_maxconn_frontend("http", 2000).unwrap(), "set maxconn frontend http 2000"),
        (Command::set_maxconn_global(5000), "set maxconn global 5000"),
        (Command::shutdown_session("0x55d3e1").unwrap(), "shutdown session 0x55d3e1"),
        (Command::shutdown_sessions_server(&selector()), "shutdown sessions server web/srv1"),
        (Command::disable_frontend("http").unwrap(), "disable frontend http"),
        (Command::enable_frontend("http").unwrap(), "enable frontend http"),
        (Command::shutdown_frontend("http").unwrap(), "shutdown frontend http"),
        (
            Command::set_dynamic_cookie_key("web", "s3cr3t").unwrap(),
            "set dynamic-cookie-key backend web s3cr3t",
        ),
        (Command::dynamic_cookie("web", true).unwrap(), "enable dynamic-cookie backend web"),
        (Command::dynamic_cookie("web", false).unwrap(), "disable dynamic-cookie backend web"),
        (
            Command::set_rate_limit(RateLimitTarget::SslSessions, 100),
            "set rate-limit ssl-sessions global 100",
        ),
    ];

    for (cmd, line) in cases {
        assert_eq!(cmd.line(), line);
        assert_eq!(cmd.contract(), ResponseContract::EmptyIsSuccess, "{}", line);
        assert_eq!(cmd.to_string(), line);
    }
}

#[test]
fn test_empty_names_rejected() {
    let none: [&str; 0] = [];
    assert!(Command::shutdown_session("").is_err());
    assert!(Command::disable_frontend("").is_err());
    assert!(Command::enable_frontend("").is_err());
    assert!(Command::shutdown_frontend("").is_err());
    assert!(Command::set_maxconn_frontend("", 1).is_err());
    assert!(Command::show_servers_state("").is_err());
    assert!(Command::set_dynamic_cookie_key("", "key").is_err());
    assert!(Command::dynamic_cookie("", true).is_err());
    assert!(Command::show_env(&["A", "B"]).is_err());
    assert!(Command::show_stat_resolvers(&["a", "b"]).is_err());
    assert!(Command::show_env(&none).is_ok());
}
