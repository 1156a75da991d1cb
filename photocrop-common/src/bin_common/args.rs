pub mod args_helper;
pub mod classify;
pub mod extract;
pub mod profile;
pub mod refine;
