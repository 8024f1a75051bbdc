//! Lookup command implementation

use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::domain::{Config, DisplayOptions};
use crate::render::{format_for_display, Selection};
use crate::store::RecordIndex;

const USAGE: &str = "Please specify exactly one of --bug-id or --bug-group-id";

#[derive(Args)]
pub struct LookupArgs {
    /// Updated JSONLines file to search in
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Look up by specific record id
    #[arg(long, value_name = "ID")]
    pub bug_id: Option<String>,

    /// Look up every record sharing a group id
    #[arg(long, value_name = "ID")]
    pub bug_group_id: Option<String>,

    /// Print elided fields in full
    #[arg(long)]
    pub no_elide: bool,

    /// Fields to elide (comma-separated), replacing the configured set
    #[arg(long, value_name = "FIELDS", conflicts_with = "no_elide")]
    pub elide: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Query<'a> {
    ById(&'a str),
    ByGroup(&'a str),
}

impl LookupArgs {
    /// Exactly one identifier flag must be present.
    fn query(&self) -> Option<Query<'_>> {
        match (self.bug_id.as_deref(), self.bug_group_id.as_deref()) {
            (Some(id), None) => Some(Query::ById(id)),
            (None, Some(group)) => Some(Query::ByGroup(group)),
            _ => None,
        }
    }

    fn display_options(&self, config: &Config) -> DisplayOptions {
        let mut options = config.display.clone();
        if self.no_elide {
            options.elide_fields = BTreeSet::new();
        } else if let Some(fields) = &self.elide {
            options.elide_fields = parse_csv(fields);
        }
        options
    }
}

pub fn run(args: LookupArgs, config: &Config) -> Result<()> {
    // Not a failure: print usage and skip the query entirely.
    let Some(query) = args.query() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let index = RecordIndex::open(&args.file, config.fields.clone())?;
    let options = args.display_options(config);

    match query {
        Query::ById(id) => match index.find_by_id(id) {
            Some(record) => {
                println!("Found bug:");
                print!("{}", format_for_display(Selection::One(record), &options)?);
            }
            None => println!("No bug found with bug_id: {}", id),
        },
        Query::ByGroup(group) => {
            let records = index.find_by_group(group);
            if records.is_empty() {
                println!("No bugs found with bug_group_id: {}", group);
            } else {
                print!("{}", format_for_display(Selection::Many(&records), &options)?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(bug_id: Option<&str>, bug_group_id: Option<&str>) -> LookupArgs {
        LookupArgs {
            file: PathBuf::from("bugs.jsonl"),
            bug_id: bug_id.map(str::to_string),
            bug_group_id: bug_group_id.map(str::to_string),
            no_elide: false,
            elide: None,
        }
    }

    #[test]
    fn query_requires_exactly_one_flag() {
        assert_eq!(args(Some("a"), None).query(), Some(Query::ById("a")));
        assert_eq!(args(None, Some("g")).query(), Some(Query::ByGroup("g")));
        assert_eq!(args(None, None).query(), None);
        assert_eq!(args(Some("a"), Some("g")).query(), None);
    }

    #[test]
    fn elide_flags_override_config() {
        let config = Config::default();

        let mut a = args(Some("a"), None);
        assert!(a.display_options(&config).elide_fields.contains("code"));

        a.elide = Some("diff, trace".to_string());
        let fields = a.display_options(&config).elide_fields;
        assert!(fields.contains("diff") && fields.contains("trace") && !fields.contains("code"));

        a.elide = None;
        a.no_elide = true;
        assert!(a.display_options(&config).elide_fields.is_empty());
    }
}
