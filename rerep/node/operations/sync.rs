use super::staging::STAGING_FILE;
use std::{io::Result as IoResult, path::Path};
use tokio::fs::read_dir;

/// Replication state that must never be copied to the slave
const EXCLUDED: [&str; 4] = ["relay-log.info", "master.info", "auto.cnf", STAGING_FILE];

fn is_segment_of(name: &str, log: &str) -> bool {
    name.strip_prefix(log)
        .and_then(|rest| rest.strip_prefix('.'))
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| c.is_ascii_digit())
}

/// Files to leave out when syncing `source`
///
/// Besides the fixed list, every log with an `<name>.index` file only has its newest
/// `<name>.<number>` segment copied. Older segments aren't needed by the slave.
pub async fn excludes(source: &Path) -> IoResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = read_dir(source).await?;

    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();

    let mut excludes = EXCLUDED.iter().map(|name| (*name).to_owned()).collect::<Vec<_>>();

    for log in names.iter().filter_map(|name| name.strip_suffix(".index")) {
        let mut segments = names
            .iter()
            .filter(|name| is_segment_of(name, log))
            .cloned()
            .collect::<Vec<_>>();

        segments.pop();
        excludes.append(&mut segments);
    }

    Ok(excludes)
}

/// rsync arguments mirroring `source` into `destination`
pub fn rsync_arguments(source: &Path, destination: &str, excludes: &[String]) -> Vec<String> {
    let mut args = vec![String::from("-SaP"), String::from("--delete")];

    args.extend(excludes.iter().map(|name| format!("--exclude={}", name)));
    args.push(format!("{}/", source.display()));
    args.push(format!("{}/", destination.trim_end_matches('/')));

    args
}
