// Formation Calendar Library
// Calendar layout and drag-to-reschedule engine for training sessions

pub mod models;
pub mod services;
pub mod ui;
pub mod utils;
