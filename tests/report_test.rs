//! Rendering and writing the standard report

mod utils;

use study_tab::algorithm::tabulation::TableSpec;
use study_tab::utils::io::write_table_to_dir;
use study_tab::{
    MatchingConfig, PartitionedMatcher, StudyConfig, Subject, default_specs, load_subjects,
    render_all,
};

fn cohort(config: &StudyConfig) -> Vec<Subject> {
    let dir = tempfile::tempdir().unwrap();
    let path = utils::write_cohort_csv(dir.path());
    load_subjects(&path, config).unwrap()
}

fn semicolon_config() -> StudyConfig {
    StudyConfig {
        delimiter: ';',
        ..StudyConfig::default()
    }
}

#[test]
fn test_default_report_over_full_cohort() {
    let config = semicolon_config();
    let subjects = cohort(&config);
    let specs = default_specs();

    let results = render_all(&specs, &subjects, &config, false);
    assert_eq!(results.len(), specs.len());
    for ((spec, result), expected) in results.iter().zip(&specs) {
        assert_eq!(spec, expected);
        assert!(result.is_ok(), "{spec} failed");
    }

    let igg = results
        .iter()
        .find(|(spec, _)| spec.name() == "igg_by_ms_vs_control")
        .map(|(_, r)| r.as_ref().unwrap())
        .unwrap();
    assert_eq!(igg.header(), ["IgG", "MS", "GK"]);
    assert_eq!(igg.rows()[0], ["positiv", "3", "0"]);
    assert_eq!(igg.rows()[1], ["negativ", "1", "2"]);
    assert_eq!(igg.rows()[2], ["n/a", "0", "1"]);

    let age = results
        .iter()
        .find(|(spec, _)| spec.name() == "age_by_group")
        .map(|(_, r)| r.as_ref().unwrap())
        .unwrap();
    assert_eq!(age.header(), ["GK", "CIS", "RRMS", "SPMS", "PPMS"]);
    assert_eq!(age.rows()[0], ["30", "40", "31", "", "60"]);
    assert_eq!(age.rows()[1], ["50", "", "49", "", ""]);
    assert_eq!(age.rows()[2], ["44", "", "", "", ""]);
}

#[test]
fn test_matched_report_uses_relabeled_groups() {
    let config = semicolon_config();
    let subjects = cohort(&config);
    let matched: Vec<Subject> = PartitionedMatcher::new(MatchingConfig::from_study(&config))
        .match_all_groups(&subjects, &config.case_groups)
        .iter()
        .flat_map(|(_, r)| r.relabeled_subjects(&config.relabel_separator))
        .collect();

    // Unmatched-mode labels do not know relabeled controls.
    let spec = TableSpec::Grouped {
        category: study_tab::Category::Group,
        measure: study_tab::Measure::Age,
    };
    assert!(spec.render(&matched, &config, false).is_err());

    let table = spec.render(&matched, &config, true).unwrap();
    assert_eq!(table.header()[0], "GK-CIS");
    assert_eq!(table.header()[1], "CIS");
    assert_eq!(table.rows()[0][1], "40");
    assert_eq!(table.rows()[0][0], "44");
}

#[test]
fn test_tables_written_one_file_each() {
    let config = semicolon_config();
    let subjects = cohort(&config);
    let out = tempfile::tempdir().unwrap();

    for (spec, result) in render_all(&default_specs(), &subjects, &config, false) {
        let table = result.unwrap();
        write_table_to_dir(out.path(), &spec.name(), &table, b';').unwrap();
    }

    let written = std::fs::read_dir(out.path()).unwrap().count();
    assert_eq!(written, default_specs().len());
    let sex = std::fs::read_to_string(out.path().join("sex_by_group.csv")).unwrap();
    assert_eq!(sex.lines().next(), Some("Sex;GK;CIS;RRMS;SPMS;PPMS"));
}
