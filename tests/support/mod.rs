#![allow(dead_code)]

pub mod backend_stub;
pub mod deeptone_env;
