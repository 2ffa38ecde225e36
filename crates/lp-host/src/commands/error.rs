/// Centralized error mapping for commands.
///
/// Keeps the full context chain so the control UI can show what failed.
pub fn map_err(err: anyhow::Error) -> String {
    format!("{err:#}")
}
