/// Settings for a [`Db`](super::Db).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database name, used in log output.
    pub name: String,
    /// Number of row slots per page when assigning rids.
    pub slots_per_page: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            name: "sys".to_string(),
            slots_per_page: 128,
        }
    }
}
