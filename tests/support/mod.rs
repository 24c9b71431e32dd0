#![allow(dead_code)]

pub mod scholar_pages;
pub mod socket_guard;
