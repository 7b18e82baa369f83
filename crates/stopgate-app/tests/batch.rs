use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{json, Value};
use stopgate_app::{run_batch, BatchInput, BatchOptions, BatchOutput};
use stopgate_test_util::{normalize_trace, trace_events};
use tempfile::TempDir;

const POLICY: &str = r#"
global:
  must_links: [cv_link]
roles:
  Engineer:
    must: [skill_rust]
    must_not: [fraud_flag]
    should: [oss, talk, blog]
  Clinical Triage:
    must: [vitals]
"#;

struct Fixture {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        for dir in ["candidates", "chunks"] {
            std::fs::create_dir_all(root.join(dir)).expect("mkdir");
        }
        std::fs::write(root.join("policy.yaml"), POLICY).expect("write policy");
        Self { _tmp: tmp, root }
    }

    fn candidate(&self, id: &str, body: Value) -> &Self {
        let path = self.root.join("candidates").join(format!("{id}.json"));
        std::fs::write(path, body.to_string()).expect("write candidate");
        self
    }

    fn raw_candidate(&self, file: &str, text: &str) -> &Self {
        std::fs::write(self.root.join("candidates").join(file), text).expect("write candidate");
        self
    }

    fn chunks(&self, id: &str, lines: &[Value]) -> &Self {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        std::fs::write(self.root.join("chunks").join(format!("{id}.jsonl")), text)
            .expect("write chunks");
        self
    }

    fn run(&self, out: &str, options: BatchOptions) -> anyhow::Result<BatchOutput> {
        let out_dir = self.root.join(out);
        run_batch(BatchInput {
            candidates_dir: &self.root.join("candidates"),
            chunks_dir: &self.root.join("chunks"),
            policy_path: &self.root.join("policy.yaml"),
            out_dir: &out_dir,
            options,
        })
    }

    /// One candidate per outcome plus an unknown role and an unreadable file.
    fn populated() -> Self {
        let fx = Self::new();
        fx.candidate(
            "c-001",
            json!({"candidate_id": "c-001", "name": "Ada", "applied_role": "Engineer",
                   "evidence": {"cv_link": "https://cv.test/ada"}}),
        )
        .chunks("c-001", &[json!({"tags": ["skill_rust", "oss"]}), json!({"tags": ["talk"]})])
        .candidate(
            "c-002",
            json!({"candidate_id": "c-002", "name": "Grace", "applied_role": "Engineer",
                   "evidence": {"cv_link": "https://cv.test/grace"}}),
        )
        .chunks("c-002", &[json!({"tags": ["skill_rust"]})])
        .candidate(
            "c-003",
            json!({"candidate_id": "c-003", "name": "Linus", "applied_role": "Engineer",
                   "evidence": {"cv_link": ""}}),
        )
        .candidate(
            "c-004",
            json!({"candidate_id": "c-004", "name": "Ken", "applied_role": "Astronaut"}),
        )
        .raw_candidate("c-005.json", "{ this is not json")
        .raw_candidate("notes.txt", "ignored");
        fx
    }
}

fn read_json(path: &Utf8Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("read artifact")).expect("json")
}

fn read_jsonl(path: &Utf8Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .expect("read artifact")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect()
}

#[test]
fn batch_routes_each_outcome_to_its_artifact() {
    let fx = Fixture::populated();
    let output = fx.run("out", BatchOptions::default()).expect("batch");

    let totals = &output.totals;
    assert_eq!((totals.total, totals.allow, totals.review, totals.stop), (5, 1, 1, 3));
    assert!(totals.is_consistent());

    let allow = read_json(&output.artifacts.allow_list);
    assert_eq!(
        allow,
        json!([{"candidate_id": "c-001", "name": "Ada", "role": "Engineer"}])
    );

    let review = read_json(&output.artifacts.review_queue);
    assert_eq!(
        review,
        json!([{
            "candidate_id": "c-002",
            "name": "Grace",
            "role": "Engineer",
            "reason": "REVIEW.missing_should_evidence",
            "detail": {"missing_should": ["oss", "talk", "blog"]}
        }])
    );

    let stops = read_jsonl(&output.artifacts.negative_proof);
    let summary: Vec<(&str, &str)> = stops
        .iter()
        .map(|r| {
            (
                r["candidate_id"].as_str().expect("id"),
                r["reason"].as_str().expect("reason"),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("c-003", "STOP.missing_must_links"),
            ("c-004", "STOP.unknown_role"),
            ("c-005", "STOP.EVIDENCE_INVALID"),
        ]
    );
    assert!(stops.iter().all(|r| r["decision"] == "STOP"));
    assert_eq!(stops[1]["detail"], json!({"role": "Astronaut"}));
    assert!(
        stops[2]["detail"]["file"]
            .as_str()
            .expect("file")
            .ends_with("c-005.json")
    );
}

#[test]
fn trace_records_the_whole_run() {
    let fx = Fixture::populated();
    let output = fx.run("out", BatchOptions::default()).expect("batch");
    let trace_path = output.trace_path.expect("trace enabled");
    assert_eq!(
        trace_path.file_name(),
        Some(format!("{}.jsonl", output.run_id).as_str())
    );

    let text = std::fs::read_to_string(&trace_path).expect("read trace");
    assert_eq!(
        trace_events(&text),
        vec![
            "RUN_START",
            "DECISION",
            "DECISION",
            "DECISION",
            "DECISION",
            "CANDIDATE_INVALID",
            "DECISION",
            "RUN_END",
        ]
    );

    let records = normalize_trace(&text);
    let seqs: Vec<u64> = records.iter().filter_map(|r| r["seq"].as_u64()).collect();
    assert_eq!(seqs, (1..=8).collect::<Vec<u64>>());

    let start = &records[0]["payload"];
    assert_eq!(start["candidates"], 5);
    assert_eq!(start["roles"], json!(["Clinical Triage", "Engineer"]));
    assert_eq!(start["policy_sha256"].as_str().map(str::len), Some(64));

    let end = &records[7]["payload"]["totals"];
    assert_eq!(end["TOTAL"], 5);
    assert_eq!(end["reasons"]["STOP.EVIDENCE_INVALID"], 1);
}

#[test]
fn parallel_run_matches_sequential_artifacts() {
    let fx = Fixture::populated();
    let sequential = fx.run("seq", BatchOptions::default()).expect("sequential");
    let parallel = fx
        .run(
            "par",
            BatchOptions {
                parallel: true,
                trace: true,
            },
        )
        .expect("parallel");

    assert_eq!(sequential.totals, parallel.totals);
    let pairs = [
        (&sequential.artifacts.allow_list, &parallel.artifacts.allow_list),
        (&sequential.artifacts.review_queue, &parallel.artifacts.review_queue),
    ];
    for (a, b) in pairs {
        assert_eq!(
            std::fs::read_to_string(a).expect("read"),
            std::fs::read_to_string(b).expect("read")
        );
    }

    assert_eq!(
        std::fs::read_to_string(&sequential.artifacts.negative_proof).expect("read"),
        std::fs::read_to_string(&parallel.artifacts.negative_proof).expect("read")
    );
}

#[test]
fn no_trace_option_skips_the_trace_dir() {
    let fx = Fixture::populated();
    let output = fx
        .run(
            "out",
            BatchOptions {
                parallel: false,
                trace: false,
            },
        )
        .expect("batch");
    assert!(output.trace_path.is_none());
    assert!(!fx.root.join("out/trace").exists());
}

#[test]
fn artifacts_are_rewritten_each_run() {
    let fx = Fixture::populated();
    fx.run("out", BatchOptions::default()).expect("first");
    let second = fx.run("out", BatchOptions::default()).expect("second");

    assert_eq!(read_jsonl(&second.artifacts.negative_proof).len(), 3);
    assert_eq!(
        read_json(&second.artifacts.allow_list)
            .as_array()
            .map(Vec::len),
        Some(1)
    );
}

#[test]
fn empty_candidates_dir_writes_empty_artifacts() {
    let fx = Fixture::new();
    let output = fx.run("out", BatchOptions::default()).expect("batch");

    assert_eq!(output.totals.total, 0);
    assert_eq!(read_json(&output.artifacts.review_queue), json!([]));
    assert_eq!(read_json(&output.artifacts.allow_list), json!([]));
    assert!(read_jsonl(&output.artifacts.negative_proof).is_empty());
}

#[test]
fn malformed_chunk_file_is_evidence_invalid() {
    let fx = Fixture::new();
    fx.candidate(
        "c-010",
        json!({"candidate_id": "c-010", "name": "Barbara", "applied_role": "Clinical Triage"}),
    );
    std::fs::write(fx.root.join("chunks/c-010.jsonl"), "{\"tags\": [\"vitals\"]}\nnope\n")
        .expect("write chunks");

    let output = fx.run("out", BatchOptions::default()).expect("batch");
    let stops = read_jsonl(&output.artifacts.negative_proof);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["reason"], "STOP.EVIDENCE_INVALID");
    assert!(
        stops[0]["detail"]["error"]
            .as_str()
            .expect("error")
            .starts_with("line 2:")
    );
}

#[test]
fn policy_failure_writes_no_artifacts() {
    let fx = Fixture::populated();
    std::fs::write(fx.root.join("policy.yaml"), "global: {}\n").expect("write policy");

    let err = fx.run("out", BatchOptions::default()).expect_err("no roles");
    assert!(format!("{err:#}").contains("no `roles` section"));
    assert!(!fx.root.join("out").exists());
}

#[test]
fn missing_candidates_dir_is_structural() {
    let fx = Fixture::new();
    std::fs::remove_dir(fx.root.join("candidates")).expect("rmdir");
    let err = fx.run("out", BatchOptions::default()).expect_err("missing dir");
    assert!(format!("{err:#}").contains("discover candidates"));
}

#[test]
fn null_and_empty_roles_stop_as_unknown() {
    let fx = Fixture::new();
    std::fs::write(fx.root.join("policy.yaml"), "roles:\n  Nullrole: ~\n  Emptyrole: {}\n")
        .expect("write policy");
    fx.candidate("c-020", json!({"candidate_id": "c-020", "applied_role": "Nullrole"}))
        .chunks("c-020", &[json!({"tags": ["anything"]})])
        .candidate("c-021", json!({"candidate_id": "c-021", "applied_role": "Emptyrole"}))
        .chunks("c-021", &[json!({"tags": ["anything"]})]);

    let output = fx.run("out", BatchOptions::default()).expect("batch");
    assert_eq!((output.totals.allow, output.totals.stop), (0, 2));
    assert_eq!(output.totals.reasons["STOP.unknown_role"], 2);
    let stops = read_jsonl(&output.artifacts.negative_proof);
    assert_eq!(stops[0]["detail"], json!({"role": "Nullrole"}));
    assert_eq!(stops[1]["detail"], json!({"role": "Emptyrole"}));
}

#[test]
fn candidate_id_cannot_escape_the_chunks_dir() {
    let fx = Fixture::new();
    std::fs::write(fx.root.join("outside.jsonl"), "{\"tags\": [\"vitals\"]}\n")
        .expect("write outside chunks");
    fx.candidate(
        "c-030",
        json!({"candidate_id": "../outside", "applied_role": "Clinical Triage"}),
    );

    let output = fx.run("out", BatchOptions::default()).expect("batch");
    let stops = read_jsonl(&output.artifacts.negative_proof);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["candidate_id"], "../outside");
    assert_eq!(stops[0]["reason"], "STOP.EVIDENCE_INVALID");
    assert!(
        stops[0]["detail"]["error"]
            .as_str()
            .expect("error")
            .contains("not a safe file name")
    );
    assert!(stops[0]["detail"]["file"].as_str().expect("file").ends_with("c-030.json"));
}
