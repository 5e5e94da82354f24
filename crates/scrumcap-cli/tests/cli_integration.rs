use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn scrumcap(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scrumcap").unwrap();
    cmd.env_remove("SCRUMCAP_FILE")
        .env_remove("SCRUMCAP_DEBUG_LOG")
        .args([
            "--file",
            file.to_str().unwrap(),
            "--default-velocity",
            "1.0",
        ]);
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn run_ok(file: &Path, args: &[&str]) -> Value {
    let output = scrumcap(file)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert!(json["success"].as_bool().unwrap());
    json
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Creates a team, selects it and gives it one full-time resource.
fn setup_team(file: &Path) -> (String, String) {
    let team = run_ok(file, &["team", "create", "--name", "Platform"]);
    let team_id = extract_id(&team);
    run_ok(file, &["team", "select", "--id", &team_id]);
    let resource = run_ok(
        file,
        &[
            "resource",
            "create",
            "--name",
            "Ada",
            "--capacity-per-day",
            "1.0",
        ],
    );
    (team_id, extract_id(&resource))
}

fn create_sprint(file: &Path, start: &str, duration: &str, points: &str) -> Value {
    run_ok(
        file,
        &[
            "sprint",
            "create",
            "--start-date",
            start,
            "--duration",
            duration,
            "--points",
            points,
        ],
    )
}

mod team_tests {
    use super::*;

    #[test]
    fn test_team_create_and_list() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");

        let json = run_ok(&file, &["team", "create", "--name", "Platform"]);
        assert_eq!(json["data"]["name"], "Platform");

        let list = run_ok(&file, &["team", "list"]);
        assert_eq!(list["data"]["count"], 1);
    }

    #[test]
    fn test_team_rename() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        let team_id = extract_id(&run_ok(&file, &["team", "create", "--name", "Platform"]));

        let json = run_ok(
            &file,
            &["team", "rename", "--id", &team_id, "--name", "Core"],
        );
        assert_eq!(json["data"]["name"], "Core");
    }

    #[test]
    fn test_select_unknown_team_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");

        scrumcap(&file)
            .args([
                "team",
                "select",
                "--id",
                "00000000-0000-0000-0000-000000000001",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_delete_team_removes_its_sprints() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        let (team_id, _) = setup_team(&file);
        create_sprint(&file, "2024-01-01", "10", "50");

        run_ok(&file, &["team", "delete", "--id", &team_id]);
        let sprints = run_ok(&file, &["sprint", "list"]);
        assert_eq!(sprints["data"]["count"], 0);
        let resources = run_ok(&file, &["resource", "list"]);
        assert_eq!(resources["data"]["count"], 0);
    }

    #[test]
    fn test_metrics_after_completion() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));
        run_ok(
            &file,
            &["sprint", "complete", "--id", &sprint_id, "--completed", "40"],
        );

        let json = run_ok(&file, &["team", "metrics"]);
        assert_eq!(json["data"]["sprint_count"], 1);
        assert_eq!(json["data"]["completed_count"], 1);
        assert_eq!(json["data"]["average_velocity"].as_f64(), Some(4.0));
        assert_eq!(json["data"]["success_rate"].as_f64(), Some(100.0));
    }
}

mod resource_tests {
    use super::*;

    #[test]
    fn test_resource_requires_active_team() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");

        scrumcap(&file)
            .args(["resource", "create", "--name", "Ada"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No active team"));
    }

    #[test]
    fn test_resource_update() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        let (_, resource_id) = setup_team(&file);

        let json = run_ok(
            &file,
            &[
                "resource",
                "update",
                "--id",
                &resource_id,
                "--capacity-per-day",
                "0.5",
            ],
        );
        assert_eq!(json["data"]["capacity_per_day"].as_f64(), Some(0.5));

        let unassigned = run_ok(
            &file,
            &["resource", "update", "--id", &resource_id, "--clear-team"],
        );
        assert!(unassigned["data"]["team_id"].is_null());
        let list = run_ok(&file, &["resource", "list", "--unassigned"]);
        assert_eq!(list["data"]["count"], 1);
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);

        scrumcap(&file)
            .args([
                "resource",
                "create",
                "--name",
                "Bob",
                "--capacity-per-day",
                "-1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
    }
}

mod sprint_tests {
    use super::*;

    #[test]
    fn test_sprint_create_computes_capacity() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);

        let json = create_sprint(&file, "2024-01-01", "10", "50");
        assert_eq!(json["data"]["end_date"], "2024-01-10");
        assert_eq!(json["data"]["duration"], 10);
        assert_eq!(json["data"]["theoretical_capacity"].as_f64(), Some(8.0));
        assert!(json["data"].get("completion").is_none());
    }

    #[test]
    fn test_sprint_create_without_team_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        run_ok(&file, &["team", "create", "--name", "Platform"]);

        scrumcap(&file)
            .args([
                "sprint",
                "create",
                "--start-date",
                "2024-01-01",
                "--duration",
                "10",
                "--points",
                "50",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No active team"));
    }

    #[test]
    fn test_overlapping_sprint_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        create_sprint(&file, "2024-01-01", "14", "40");

        scrumcap(&file)
            .args([
                "sprint",
                "create",
                "--start-date",
                "2024-01-10",
                "--duration",
                "5",
                "--points",
                "20",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("overlaps"));

        let list = run_ok(&file, &["sprint", "list"]);
        assert_eq!(list["data"]["count"], 1);
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);

        scrumcap(&file)
            .args([
                "sprint",
                "create",
                "--start-date",
                "2024-01-01",
                "--duration",
                "0",
                "--points",
                "20",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid duration"));
    }

    #[test]
    fn test_invalid_date_rejected_by_parser() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");

        scrumcap(&file)
            .args([
                "sprint",
                "create",
                "--start-date",
                "01/10/2024",
                "--duration",
                "5",
                "--points",
                "20",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_complete_sprint_success() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));

        let json = run_ok(
            &file,
            &[
                "sprint",
                "complete",
                "--id",
                &sprint_id,
                "--completed",
                "40",
                "--objective-achieved",
                "true",
            ],
        );
        let completion = &json["data"]["completion"];
        assert_eq!(completion["velocity_achieved"].as_f64(), Some(4.0));
        assert_eq!(completion["commitment_respected"].as_f64(), Some(80.0));
        assert_eq!(completion["is_successful"], true);
        assert_eq!(json["data"]["objective_achieved"], true);
    }

    #[test]
    fn test_sprint_list_filters_by_status() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let first = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));
        create_sprint(&file, "2024-01-15", "10", "30");
        run_ok(
            &file,
            &["sprint", "complete", "--id", &first, "--completed", "40"],
        );

        let completed = run_ok(&file, &["sprint", "list", "--status", "completed"]);
        assert_eq!(completed["data"]["count"], 1);
        assert_eq!(completed["data"]["items"][0]["id"], first.as_str());

        let open = run_ok(&file, &["sprint", "list", "--status", "in-progress"]);
        assert_eq!(open["data"]["count"], 1);

        scrumcap(&file)
            .args(["sprint", "list", "--status", "archived"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid status"));
    }

    #[test]
    fn test_next_sprint_uses_achieved_velocity() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));
        run_ok(
            &file,
            &["sprint", "complete", "--id", &sprint_id, "--completed", "40"],
        );

        // Jan 15..19 is five weekdays at 4 points per day
        let json = create_sprint(&file, "2024-01-15", "5", "20");
        assert_eq!(json["data"]["theoretical_capacity"].as_f64(), Some(20.0));
    }

    #[test]
    fn test_set_capacity_then_recompute() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        let (_, resource_id) = setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));

        let edited = run_ok(
            &file,
            &[
                "sprint",
                "set-capacity",
                "--id",
                &sprint_id,
                "--resource-id",
                &resource_id,
                "--date",
                "2024-01-02",
                "--capacity",
                "0",
            ],
        );
        assert_eq!(edited["data"]["theoretical_capacity"].as_f64(), Some(8.0));

        let recomputed = run_ok(&file, &["sprint", "recompute", "--id", &sprint_id]);
        assert_eq!(recomputed["data"]["theoretical_capacity"].as_f64(), Some(7.0));
    }

    #[test]
    fn test_set_capacity_outside_sprint_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        let (_, resource_id) = setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));

        scrumcap(&file)
            .args([
                "sprint",
                "set-capacity",
                "--id",
                &sprint_id,
                "--resource-id",
                &resource_id,
                "--date",
                "2024-02-01",
                "--capacity",
                "1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
    }

    #[test]
    fn test_update_reschedules_sprint() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));

        let json = run_ok(
            &file,
            &[
                "sprint",
                "update",
                "--id",
                &sprint_id,
                "--duration",
                "5",
                "--objective",
                "Ship billing",
            ],
        );
        assert_eq!(json["data"]["end_date"], "2024-01-05");
        assert_eq!(json["data"]["theoretical_capacity"].as_f64(), Some(5.0));
        assert_eq!(json["data"]["objective"], "Ship billing");
    }

    #[test]
    fn test_sync_resources_adds_new_member() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));
        run_ok(
            &file,
            &[
                "resource",
                "create",
                "--name",
                "Lin",
                "--capacity-per-day",
                "0.5",
            ],
        );

        let before = run_ok(&file, &["sprint", "get", "--id", &sprint_id]);
        assert_eq!(before["data"]["resources"].as_array().unwrap().len(), 1);

        let json = run_ok(&file, &["sprint", "sync-resources", "--id", &sprint_id]);
        assert_eq!(json["data"]["resources"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["theoretical_capacity"].as_f64(), Some(12.0));
    }

    #[test]
    fn test_sprint_calendar() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-03", "10", "50"));

        let json = run_ok(&file, &["sprint", "calendar", "--id", &sprint_id]);
        assert_eq!(json["data"]["count"], 1);
        let calendar = &json["data"]["items"][0];
        assert_eq!(calendar["name"], "Ada");
        assert_eq!(calendar["presence_days"].as_f64(), Some(8.0));

        let weeks = calendar["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0]["week_start"], "2024-01-01");
        let first_cells = weeks[0]["cells"].as_array().unwrap();
        assert_eq!(first_cells.len(), 7);
        assert_eq!(first_cells[0]["in_sprint"], false);
        assert_eq!(first_cells[2]["in_sprint"], true);
    }

    #[test]
    fn test_sprint_delete() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));

        run_ok(&file, &["sprint", "delete", "--id", &sprint_id]);
        scrumcap(&file)
            .args(["sprint", "get", "--id", &sprint_id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Sprint not found"));
    }
}

mod export_import_tests {
    use super::*;

    #[test]
    fn test_export_then_import_into_new_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);
        let sprint_id = extract_id(&create_sprint(&file, "2024-01-01", "10", "50"));
        run_ok(
            &file,
            &["sprint", "complete", "--id", &sprint_id, "--completed", "40"],
        );

        let exported = scrumcap(&file)
            .arg("export")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let export_json = parse_json_output(&exported);
        assert_eq!(export_json["teams"].as_array().unwrap().len(), 1);

        let export_file = dir.path().join("export.json");
        fs::write(&export_file, &exported).unwrap();

        let target = dir.path().join("target.json");
        let imported = run_ok(
            &target,
            &["import", "--input", export_file.to_str().unwrap()],
        );
        assert_eq!(imported["data"]["count"], 1);
        assert_eq!(imported["data"]["items"][0]["name"], "Platform");

        let sprints = run_ok(&target, &["sprint", "list"]);
        assert_eq!(sprints["data"]["count"], 1);
        let sprint = &sprints["data"]["items"][0];
        assert_ne!(sprint["id"].as_str().unwrap(), sprint_id);
        assert_eq!(sprint["completion"]["velocity_achieved"].as_f64(), Some(4.0));
    }

    #[test]
    fn test_import_missing_file_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");

        scrumcap(&file)
            .args(["import", "--input", "/nonexistent/export.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read file"));
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn test_file_uses_versioned_envelope() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("scrum.json");
        setup_team(&file);

        let content = fs::read_to_string(&file).unwrap();
        let json: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["data"]["teams"].as_array().unwrap().len(), 1);
        assert!(json["data"]["active_team_id"].is_string());
    }
}
