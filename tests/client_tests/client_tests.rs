//! Client Tests
//!
//! Drives the client against a scripted transport and checks the command
//! sent and the interpretation of each response.

use std::io;

use proxysock::network::ScriptedTransport;
use proxysock::{Client, ProxyError};

fn client(replies: &[&str]) -> Client<ScriptedTransport> {
    let transport = replies
        .iter()
        .fold(ScriptedTransport::new(), |t, reply| t.reply(*reply));
    Client::new(transport)
}

fn sent(client: &Client<ScriptedTransport>) -> Vec<String> {
    client.transport().sent()
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_set_weight_success() {
    let c = client(&[""]);
    c.set_weight("web", "srv1", "25").unwrap();
    assert_eq!(sent(&c), vec!["set server web/srv1 weight 25"]);
}

#[test]
fn test_set_weight_error_carries_body() {
    let c = client(&["No such server.\n"]);
    match c.server("web", "nope").unwrap().weight("25") {
        Err(ProxyError::Protocol(body)) => assert_eq!(body, "No such server."),
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[test]
fn test_invalid_state_sends_nothing() {
    let c = client(&[]);
    let result = c.server("web", "srv1").unwrap().state("offline");
    assert!(matches!(result, Err(ProxyError::InvalidArgument(_))));
    assert!(sent(&c).is_empty());
}

#[test]
fn test_empty_selector_sends_nothing() {
    let c = client(&[]);
    assert!(matches!(c.server("", "srv1"), Err(ProxyError::InvalidArgument(_))));
    assert!(matches!(c.get_weight("web", ""), Err(ProxyError::InvalidArgument(_))));
    assert!(sent(&c).is_empty());
}

#[test]
fn test_addr_changed_from() {
    let c = client(&[
        "IP changed from '10.0.0.1' to '10.0.0.2', no port change by 'stats socket command'",
        "Invalid addr.",
    ]);
    let server = c.server("web", "srv1").unwrap();

    server.addr("10.0.0.2", &["8080"]).unwrap();
    assert!(matches!(
        server.addr("bogus", &[] as &[&str]),
        Err(ProxyError::Protocol(_))
    ));
    assert_eq!(
        sent(&c),
        vec![
            "set server web/srv1 addr 10.0.0.2 port 8080",
            "set server web/srv1 addr bogus",
        ]
    );
}

#[test]
fn test_agent_addr_non_empty_success() {
    let c = client(&["some informational text", "agent checks are not enabled on this server."]);
    let server = c.server("web", "srv1").unwrap();

    server.agent_addr("10.0.0.9").unwrap();
    assert!(server.agent_addr("10.0.0.9").is_err());
}

#[test]
fn test_legacy_aliases() {
    let c = client(&["", "", "", "", "Agent changed from down to up", "Agent changed from up to down"]);

    c.disable_server("web", "srv1").unwrap();
    c.enable_server("web", "srv1").unwrap();
    c.disable_health("web", "srv1").unwrap();
    c.enable_health("web", "srv1", "up").unwrap();
    c.enable_agent("web", "srv1").unwrap();
    c.disable_agent("web", "srv1").unwrap();

    assert_eq!(
        sent(&c),
        vec![
            "set server web/srv1 state maint",
            "set server web/srv1 state ready",
            "set server web/srv1 health down",
            "set server web/srv1 health up",
            "set server web/srv1 agent up",
            "set server web/srv1 agent down",
        ]
    );
}

#[test]
fn test_rate_limit() {
    let c = client(&[""]);
    c.set_rate_limit("sessions", 500).unwrap();
    assert!(matches!(c.set_rate_limit("bandwidth", 1), Err(ProxyError::InvalidArgument(_))));
    assert_eq!(sent(&c), vec!["set rate-limit sessions global 500"]);
}

#[test]
fn test_transport_failure_propagates() {
    let c = Client::new(ScriptedTransport::new().fail(io::ErrorKind::BrokenPipe, "gone"));
    match c.clear_counters(true) {
        Err(ProxyError::Transport(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_show_stat() {
    let c = client(&["# pxname,svname,status,\nweb,FRONTEND,OPEN,\nweb,srv1,UP,\n"]);
    let stats = c.show_stat().unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[1]["svname"], "srv1");
    assert_eq!(stats[1]["status"], "UP");
    assert_eq!(sent(&c), vec!["show stat"]);
}

#[test]
fn test_show_cli_sockets_uses_spaces() {
    let c = client(&["# socket lvl processes\nunix@/run/haproxy.sock admin all"]);
    let sockets = c.show_cli_sockets().unwrap();
    assert_eq!(sockets[0]["lvl"], "admin");
}

#[test]
fn test_show_servers_state() {
    let c = client(&[
        "1\n# be_id be_name srv_id srv_name\n3 web 1 srv1",
        "Can't find backend.",
        "2\n# be_id",
    ]);

    let state = c.show_servers_state("web").unwrap();
    assert_eq!(state[0]["srv_name"], "srv1");
    assert!(matches!(c.show_servers_state("nope"), Err(ProxyError::NotFound(_))));
    assert!(matches!(c.show_servers_state("web"), Err(ProxyError::UnsupportedVersion(_))));
}

#[test]
fn test_show_sess_and_pools() {
    let c = client(&[
        "0x1: proto=tcpv4 src=10.0.0.1:4000 age=1s calls=1\n0x2: proto=unix_stream src=unix:1 age=0s calls=2",
        "Dumping pools usage. Use SIGQUIT to flush them.\n  - Pool buffer (16384 bytes) : 3 allocated (49152 bytes), 2 used, 0 failures, 5 users, @0x5=03 [SHARED]\nTotal: 1 pools, 49152 bytes allocated, 32768 used.",
    ]);

    let sessions = c.show_sess().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[1].proto, "unix_stream");

    let pools = c.show_pools().unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].used, 2);
    assert!(pools[0].shared);
}

#[test]
fn test_show_env_and_info() {
    let c = client(&[
        "A=1\nB=2\nC=3\nD=4\nE=5",
        "Name: HAProxy\nVersion: 2.8.3",
    ]);

    let env = c.show_env(&[] as &[&str]).unwrap();
    assert_eq!(env["E"], "5");

    let info = c.show_info().unwrap();
    assert_eq!(info["Version"], "2.8.3");

    assert!(matches!(c.show_env(&["A", "B"]), Err(ProxyError::InvalidArgument(_))));
    assert_eq!(sent(&c), vec!["show env", "show info"]);
}

#[test]
fn test_get_weight_and_schema_return_raw_text() {
    let c = client(&["10 (initial 10)\n", "{\"$schema\": \"...\"}"]);
    assert_eq!(c.get_weight("web", "srv1").unwrap(), "10 (initial 10)");
    assert_eq!(c.show_schema_json().unwrap(), "{\"$schema\": \"...\"}");
}

#[test]
fn test_resolvers_optional_id() {
    let c = client(&["# id,sent\ndns1,10", "# id,sent\ndns1,10"]);
    c.show_stat_resolvers(&[] as &[&str]).unwrap();
    c.show_stat_resolvers(&["dns1"]).unwrap();
    assert_eq!(sent(&c), vec!["show stat resolvers", "show stat resolvers dns1"]);
}
