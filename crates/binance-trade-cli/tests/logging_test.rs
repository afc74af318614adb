/*
[INPUT]:  Temporary log directory
[OUTPUT]: Test results for subscriber installation and file sink setup
[POS]:    Integration tests - logging
[UPDATE]: When logging sinks change
*/

use binance_trade_cli::logging::init_tracing;

#[test]
fn test_init_tracing_creates_log_dir_and_rejects_second_install() {
    let dir = std::env::temp_dir().join(format!("binance-trade-logs-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let guard = init_tracing("info", Some(&dir)).expect("first install");
    assert!(guard.is_some());
    assert!(dir.is_dir());

    tracing::info!("log line for the file sink");

    assert!(init_tracing("info", None).is_err());

    drop(guard);
    let _ = std::fs::remove_dir_all(&dir);
}
