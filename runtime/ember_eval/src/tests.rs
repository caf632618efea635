use super::*;

#[test]
fn test_init_tracing_runs_once() {
    init_tracing();
    assert!(!init_tracing());
    assert!(!init_tracing());
}
