//! Command-line presentation layer.
//!
//! Parses arguments, drives the [`PeopleStore`](crate::store::PeopleStore)
//! and renders snapshots and notices as text.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod render;
mod setup;

pub use commands::{execute, Outcome};
pub use render::{render_people, render_person, render_status};
pub use setup::setup_instructions;

#[derive(Parser, Debug)]
#[command(name = "duaalist")]
#[command(about = "Keep a checklist of duaas for the people you pray for")]
#[command(version)]
pub struct Cli {
    /// Only list people whose name or duaas contain this text
    #[arg(short, long, global = true, value_name = "TERM")]
    pub search: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List people with their progress
    List,
    /// Show one person's duaas
    Show(PersonArgs),
    /// Add a person
    AddPerson(NameArgs),
    /// Remove a person and all of their duaas
    RemovePerson(PersonArgs),
    /// Add a duaa to a person
    Add(AddDuaaArgs),
    /// Mark a duaa as complete
    Done(DuaaArgs),
    /// Mark a duaa as not complete
    Undo(DuaaArgs),
    /// Change a duaa's text
    Edit(EditDuaaArgs),
    /// Remove a duaa
    Remove(DuaaArgs),
    /// Mark every completed duaa as not complete
    Reset,
    /// Check the connection and show totals
    Status,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PersonArgs {
    /// Person name, id, or id prefix
    pub person: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddDuaaArgs {
    /// Person name, id, or id prefix
    pub person: String,
    pub text: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DuaaArgs {
    /// Person name, id, or id prefix
    pub person: String,
    /// Duaa position (1-based), id, or id prefix
    pub duaa: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditDuaaArgs {
    /// Person name, id, or id prefix
    pub person: String,
    /// Duaa position (1-based), id, or id prefix
    pub duaa: String,
    pub text: String,
}
