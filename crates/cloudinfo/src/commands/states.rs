//! States command

use anyhow::Result;
use cloudinfo_images::ImageState;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::StatesArgs;

#[derive(Tabled, Serialize)]
struct StateRow {
    state: &'static str,
    description: &'static str,
}

fn describe(state: ImageState) -> &'static str {
    match state {
        ImageState::Active => "Current images, recommended for new deployments",
        ImageState::Inactive => "Superseded, still supported",
        ImageState::Deprecated => "Scheduled for removal, usually names a replacement",
        ImageState::Deleted => "Removed from the provider",
    }
}

fn rows() -> Vec<StateRow> {
    ImageState::ALL
        .into_iter()
        .map(|state| StateRow {
            state: state.as_str(),
            description: describe(state),
        })
        .collect()
}

pub fn run(args: StatesArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows())?);
    } else {
        let mut table = Table::new(rows());
        table.with(Style::sharp());
        println!("{}", table);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_every_state() {
        let names: Vec<_> = rows().iter().map(|r| r.state).collect();
        assert_eq!(names, vec!["active", "inactive", "deprecated", "deleted"]);
    }
}
