#[path = "helpers/mod.rs"]
mod helpers;

#[path = "project/mod.rs"]
mod project;

#[path = "hir/mod.rs"]
mod hir;

#[path = "ide/mod.rs"]
mod ide;
