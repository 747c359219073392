// Service module exports

pub mod event;
