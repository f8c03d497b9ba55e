use text_rope::Rope;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a rope by appending each piece in turn, leaving the tree unbalanced.
#[allow(dead_code)]
pub fn appended(pieces: &[&str]) -> Rope {
    pieces
        .iter()
        .fold(Rope::new(), |rope, piece| rope.append(&Rope::from_str(piece)))
}
