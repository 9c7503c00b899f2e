use std::{cell::RefCell, collections::HashMap, fs, path::{Path, PathBuf}};
use libvbatch::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Probe(PathBuf),
    Scan(PathBuf),
    Concat(PathBuf, PathBuf),
    Extract(PathBuf, u64, u64, PathBuf),
}

/// Engine that records every call and answers with canned durations
#[derive(Default)]
struct FakeEngine {
    durations: HashMap<String, f64>,
    fail_extract_at: Option<u64>,
    fail_concat: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeEngine {
    fn with_durations(durations: &[(&str, f64)]) -> Self {
        Self {
            durations: durations.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    fn duration_of(&self, path: &Path) -> Result<f64> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        self.durations.get(&name).copied().ok_or(Error::Parse {
            what: "duration",
            input: name,
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl MediaEngine for FakeEngine {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        self.calls.borrow_mut().push(Call::Probe(path.to_path_buf()));
        self.duration_of(path)
    }

    fn scan_duration(&self, path: &Path) -> Result<f64> {
        self.calls.borrow_mut().push(Call::Scan(path.to_path_buf()));
        self.duration_of(path)
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Concat(manifest.to_path_buf(), output.to_path_buf()));

        if self.fail_concat {
            return Err(Error::ExternalTool {
                program: "ffmpeg".into(),
                code: 8,
                stderr: "Impossible to open".into(),
            });
        }

        Ok(())
    }

    fn extract_range(&self, source: &Path, start: u64, duration: u64, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Extract(source.to_path_buf(), start, duration, output.to_path_buf()));

        if self.fail_extract_at == Some(start) {
            return Err(Error::ExternalTool {
                program: "ffmpeg".into(),
                code: 1,
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

fn media_dir(names: &[&str]) -> (tempfile::TempDir, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("day1");
    fs::create_dir(&dir).unwrap();

    for name in names {
        fs::write(dir.join(name), "").unwrap();
    }

    (root, dir)
}

#[test]
fn merge_folder_test() {
    let (root, dir) = media_dir(&["b.mp4", "a.mp4", "skip.txt"]);
    let engine = FakeEngine::with_durations(&[("a.mp4", 90.0), ("b.mp4", 3600.0)]);

    let mut options = MergeOptions::new(&dir, "full");
    options.manifest = root.path().join("filelist.txt");

    let report = merge_folder(&engine, &options).unwrap();

    assert_eq!(report.files, [dir.join("a.mp4"), dir.join("b.mp4")]);
    assert_eq!(report.total_duration, 3690.0);
    assert_eq!(report.output, root.path().join("day1_full.mp4"));

    assert_eq!(
        fs::read_to_string(&options.manifest).unwrap(),
        format!("file '{}'\nfile '{}'\n", dir.join("a.mp4").display(), dir.join("b.mp4").display()),
    );

    assert_eq!(engine.calls(), [
        Call::Scan(dir.join("a.mp4")),
        Call::Scan(dir.join("b.mp4")),
        Call::Concat(options.manifest.clone(), root.path().join("day1_full.mp4")),
    ]);
}

#[test]
fn merge_empty_folder_test() {
    let (root, dir) = media_dir(&["notes.txt"]);
    let engine = FakeEngine::default();

    let mut options = MergeOptions::new(&dir, "full");
    options.manifest = root.path().join("filelist.txt");

    assert!(matches!(merge_folder(&engine, &options), Err(Error::EmptyInput { .. })));

    // the engine is never touched and no manifest is written
    assert!(engine.calls().is_empty());
    assert!(!options.manifest.exists());
}

#[test]
fn merge_unreadable_duration_test() {
    let (root, dir) = media_dir(&["a.mp4", "b.mp4"]);
    let engine = FakeEngine::with_durations(&[("a.mp4", 90.0)]);

    let mut options = MergeOptions::new(&dir, "full");
    options.manifest = root.path().join("filelist.txt");

    assert!(matches!(merge_folder(&engine, &options), Err(Error::Parse { .. })));

    // nothing is concatenated once a duration is missing
    assert!(!engine.calls().iter().any(|x| matches!(x, Call::Concat(..))));
}

#[test]
fn merge_engine_failure_test() {
    let (root, dir) = media_dir(&["a.mp4"]);
    let engine = FakeEngine {
        fail_concat: true,
        ..FakeEngine::with_durations(&[("a.mp4", 1.0)])
    };

    let mut options = MergeOptions::new(&dir, "full");
    options.manifest = root.path().join("filelist.txt");

    let err = merge_folder(&engine, &options).unwrap_err();
    assert_eq!(err.exit_code(), 8);
}

#[test]
fn merge_is_repeatable_test() {
    let (root, dir) = media_dir(&["2.mp4", "1.mp4", "3.mp4"]);
    let engine = FakeEngine::with_durations(&[("1.mp4", 1.0), ("2.mp4", 2.0), ("3.mp4", 3.0)]);

    let mut options = MergeOptions::new(&dir, "full");
    options.manifest = root.path().join("filelist.txt");

    let first = merge_folder(&engine, &options).unwrap();
    let first_manifest = fs::read_to_string(&options.manifest).unwrap();
    let first_calls = engine.calls();

    engine.calls.borrow_mut().clear();

    let second = merge_folder(&engine, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_manifest, fs::read_to_string(&options.manifest).unwrap());
    assert_eq!(first_calls, engine.calls());
}

#[test]
fn merge_dot_input_test() {
    let (root, dir) = media_dir(&["a.mp4"]);
    let engine = FakeEngine::with_durations(&[("a.mp4", 1.0)]);

    let mut options = MergeOptions::new(dir.join("."), "full");
    options.manifest = root.path().join("filelist.txt");

    let first = merge_folder(&engine, &options).unwrap();
    assert_eq!(first.output, root.path().join("day1_full.mp4"));

    // result of the previous run exists now, it must not become a source
    fs::write(&first.output, "").unwrap();

    let second = merge_folder(&engine, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.files, [dir.join("a.mp4")]);
}

#[test]
fn split_recording_test() {
    let engine = FakeEngine::with_durations(&[("160824.mp4", 7500.0)]);
    let start = StartTime::from_filename("160824_000000.mp4", DateOrder::DayFirst).unwrap();

    let mut options = SplitOptions::new("rec/160824.mp4", start);
    options.output_dir = PathBuf::from("out");

    let mut created = vec![];
    let segments = split_recording(&engine, &options, |x| created.push(x.output.clone())).unwrap();

    let expected = [
        PathBuf::from("out/view1_2024-08-16_00-00-00.mp4"),
        PathBuf::from("out/view1_2024-08-16_01-00-00.mp4"),
        PathBuf::from("out/view1_2024-08-16_02-00-00.mp4"),
    ];

    assert_eq!(created, expected);
    assert_eq!(segments.iter().map(|x| x.offset).collect::<Vec<_>>(), [0, 3600, 7200]);

    let source = PathBuf::from("rec/160824.mp4");
    assert_eq!(engine.calls(), [
        Call::Probe(source.clone()),
        Call::Extract(source.clone(), 0, 3600, expected[0].clone()),
        Call::Extract(source.clone(), 3600, 3600, expected[1].clone()),
        Call::Extract(source.clone(), 7200, 3600, expected[2].clone()),
    ]);
}

#[test]
fn split_aborts_on_failure_test() {
    let engine = FakeEngine {
        fail_extract_at: Some(3600),
        ..FakeEngine::with_durations(&[("160824.mp4", 7500.0)])
    };
    let start = StartTime::from_filename("160824_000000.mp4", DateOrder::DayFirst).unwrap();
    let options = SplitOptions::new("160824.mp4", start);

    let mut created = 0;
    assert!(split_recording(&engine, &options, |_| created += 1).is_err());

    // first segment was written, the third one never attempted
    assert_eq!(created, 1);
    assert_eq!(engine.calls().len(), 3);
}

#[test]
fn split_probe_failure_test() {
    let engine = FakeEngine::default();
    let start = StartTime::from_filename("160824_000000.mp4", DateOrder::DayFirst).unwrap();
    let options = SplitOptions::new("160824.mp4", start);

    assert!(matches!(split_recording(&engine, &options, |_| {}), Err(Error::Parse { .. })));
    assert_eq!(engine.calls().len(), 1);
}
