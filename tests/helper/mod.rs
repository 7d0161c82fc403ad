#![allow(dead_code)]

pub mod capabilities;
pub mod site_packages;
