#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("task capacity exceeded: at most {0} tasks may be live at once")]
    CapacityExceeded(usize),
}
