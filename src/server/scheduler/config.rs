pub mod camera {
    /// Cron expression for purging cameras whose undo window has passed.
    /// Runs every 10 seconds so a deleted camera disappears shortly after its deadline.
    pub const PURGE_CRON_EXPRESSION: &str = "*/10 * * * * *";
}
