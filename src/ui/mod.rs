// Calendar interaction and layout
// Pure view layout plus the gesture state machines driving rescheduling

pub mod click;
pub mod controller;
pub mod drag;
pub mod views;
