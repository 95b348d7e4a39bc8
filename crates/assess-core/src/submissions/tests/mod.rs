mod common;
mod monitor;
mod service;
