use std::path::PathBuf;
use std::time::SystemTime;

use super::listing::SourceFileRecord;

/// Partition candidate records into the stale file set
///
/// The marker is an explicit parameter rather than ambient state so the
/// algorithm is independently testable. `None` means no build has been
/// recorded yet and every candidate is stale.
///
/// The comparison is inclusive (`modified_at >= marker`): a file modified in
/// the same resolution window as the marker is still considered stale. The
/// bias is toward over-compiling rather than silently skipping a changed
/// file.
///
/// Enumeration order is preserved; it carries no correctness weight, only
/// log readability.
pub fn stale_files(records: &[SourceFileRecord], marker: Option<SystemTime>) -> Vec<PathBuf> {
    match marker {
        None => records.iter().map(|r| r.path.clone()).collect(),
        Some(instant) => records
            .iter()
            .filter(|r| r.modified_at >= instant)
            .map(|r| r.path.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn record(name: &str, secs: u64) -> SourceFileRecord {
        SourceFileRecord {
            path: PathBuf::from(name),
            modified_at: at(secs),
        }
    }

    #[test]
    fn test_marker_between_files_selects_newer() {
        let records = vec![record("A.java", 10), record("B.java", 20)];

        let stale = stale_files(&records, Some(at(15)));

        assert_eq!(stale, vec![PathBuf::from("B.java")]);
    }

    #[test]
    fn test_absent_marker_selects_everything() {
        let records = vec![record("A.java", 10), record("B.java", 20)];

        let stale = stale_files(&records, None);

        assert_eq!(stale.len(), 2);
    }

    #[test]
    fn test_comparison_is_inclusive() {
        let records = vec![record("A.java", 15)];

        let stale = stale_files(&records, Some(at(15)));

        assert_eq!(stale, vec![PathBuf::from("A.java")]);
    }

    #[test]
    fn test_marker_after_all_files_selects_nothing() {
        let records = vec![record("A.java", 10), record("B.java", 20)];

        let stale = stale_files(&records, Some(at(30)));

        assert!(stale.is_empty());
    }

    #[test]
    fn test_enumeration_order_is_preserved() {
        let records = vec![
            record("Z.java", 20),
            record("A.java", 30),
            record("M.java", 25),
        ];

        let stale = stale_files(&records, Some(at(10)));

        assert_eq!(
            stale,
            vec![
                PathBuf::from("Z.java"),
                PathBuf::from("A.java"),
                PathBuf::from("M.java"),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_stale_set_equals_filtered_subset(
            times in proptest::collection::vec(0u64..10_000, 0..32),
            marker in proptest::option::of(0u64..10_000),
        ) {
            let records: Vec<SourceFileRecord> = times
                .iter()
                .enumerate()
                .map(|(i, &t)| record(&format!("f{i}.java"), t))
                .collect();
            let marker_instant = marker.map(at);

            let stale = stale_files(&records, marker_instant);

            let expected: Vec<PathBuf> = records
                .iter()
                .filter(|r| marker_instant.map_or(true, |m| r.modified_at >= m))
                .map(|r| r.path.clone())
                .collect();
            prop_assert_eq!(&stale, &expected);

            // Running the detector twice over unchanged inputs yields the
            // same set
            prop_assert_eq!(stale_files(&records, marker_instant), stale);
        }
    }
}
