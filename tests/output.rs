use nsga2_sch::output::{front_file_name, FrontWriter, OutputError, FRONT_FILE_HEADER};
use nsga2_sch::{Objectives, RunResult};
use std::fs;

fn run_with_front(points: &[(f64, f64)]) -> RunResult {
    let front = points
        .iter()
        .map(|&(f1, f2)| Objectives::new(f1, f2))
        .collect();
    RunResult::new(front, 0.25, 100, 4)
}

#[test]
fn writes_one_file_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FrontWriter::new(dir.path());

    let first = writer
        .write_run(0, &run_with_front(&[(0.5, 3.125), (2.0, 0.0)]))
        .unwrap();
    let second = writer.write_run(1, &run_with_front(&[(1.0, 1.0)])).unwrap();

    assert_eq!(first, dir.path().join("pareto_run1.csv"));
    assert_eq!(second, dir.path().join(front_file_name(1)));
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        "f1,f2\n0.5000000000,3.1250000000\n2.0000000000,0.0000000000\n"
    );
    assert_eq!(
        fs::read_to_string(&second).unwrap(),
        "f1,f2\n1.0000000000,1.0000000000\n"
    );
}

#[test]
fn existing_files_are_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FrontWriter::new(dir.path());
    fs::write(writer.path_for(0), "stale contents\nmore\nlines\n").unwrap();

    writer.write_run(0, &run_with_front(&[])).unwrap();
    let text = fs::read_to_string(writer.path_for(0)).unwrap();
    assert_eq!(text.trim_end(), FRONT_FILE_HEADER);
}

#[test]
fn missing_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("fronts").join("schaffer");
    let writer = FrontWriter::new(&nested);
    let path = writer.write_run(2, &run_with_front(&[(1.0, 2.0)])).unwrap();
    assert_eq!(path, nested.join("pareto_run3.csv"));
    assert!(path.exists());
}

#[test]
fn unwritable_destination_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "").unwrap();

    let writer = FrontWriter::new(&blocker);
    let err = writer
        .write_run(0, &run_with_front(&[(1.0, 1.0)]))
        .unwrap_err();
    let OutputError::Io { path, .. } = &err;
    assert!(path.starts_with(&blocker));
    assert!(err.to_string().contains("not-a-directory"));
}
