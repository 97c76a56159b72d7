use std::{fs, str::FromStr};

use tempdir::TempDir;

use stashlib::{
    Action, ActionSet, Command, DiskSource, DisplayDriver, FileSource,
    LocalPlatform, MemorySource, Notice, RecordId, Registry, Session,
    SourceFile, StashError, ViewRow,
};

/// Display driver that records every render pass and notice for assertions.
#[derive(Default)]
struct RecordingDriver {
    renders: Vec<(Vec<ViewRow>, u64)>,
    notices: Vec<Notice>,
}

impl RecordingDriver {
    fn last_rows(&self) -> &[ViewRow] {
        let (rows, _) = self.renders.last().expect("no render happened");
        rows
    }

    fn last_total(&self) -> u64 {
        self.renders.last().expect("no render happened").1
    }
}

impl DisplayDriver for RecordingDriver {
    fn render(&mut self, rows: &[ViewRow], total_size: u64) {
        self.renders.push((rows.to_vec(), total_size));
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn disk_source_gathers_regular_files_only() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");

    fs::write(dir.path().join("report.pdf"), b"%PDF-1.4").unwrap();
    fs::write(dir.path().join(".hidden"), b"secret").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("photo.png"), b"\x89PNG")
        .unwrap();

    let mut files = DiskSource::new(dir.path())
        .gather()
        .expect("gather failed");
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["photo.png", "report.pdf"]);
    assert_eq!(files[1].size, 8);
    assert_eq!(files[1].content.bytes(), b"%PDF-1.4".as_slice());
}

#[test]
fn session_ingests_and_renders_sorted_rows() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        let files = MemorySource::new(vec![
            SourceFile::from_bytes("invoice.txt", vec![0; 1024]),
            SourceFile::from_bytes("Report.pdf", vec![0; 2048]),
        ])
        .gather()
        .unwrap();
        session.apply(Command::Ingest(files)).unwrap();
    }

    let names: Vec<_> = driver
        .last_rows()
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(names, vec!["invoice.txt", "Report.pdf"]);
    assert_eq!(driver.last_total(), 3072);
    assert!(matches!(
        driver.notices[0],
        Notice::Ingested { count: 2, .. }
    ));
}

#[test]
fn session_search_filters_without_reordering() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![
                SourceFile::from_bytes("Report.pdf", vec![0; 8]),
                SourceFile::from_bytes("invoice.txt", vec![0; 8]),
                SourceFile::from_bytes("Photo.png", vec![0; 8]),
            ]))
            .unwrap();
        session
            .apply(Command::Search("PDF".to_string()))
            .unwrap();
    }

    let rows = driver.last_rows();
    assert_eq!(rows.len(), 3);
    let visible: Vec<_> = rows
        .iter()
        .filter(|row| row.visible)
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Report.pdf"]);
}

#[test]
fn session_pin_moves_record_to_front() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![
                SourceFile::from_bytes("alpha.txt", vec![0; 8]),
                SourceFile::from_bytes("zeta.txt", vec![0; 8]),
            ]))
            .unwrap();
        let zeta = session.registry().records()[1].id();
        session.apply(Command::TogglePinned(zeta)).unwrap();
    }

    let names: Vec<_> = driver
        .last_rows()
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(names, vec!["zeta.txt", "alpha.txt"]);
    assert!(driver.last_rows()[0].pinned);
}

#[test]
fn session_rejected_rename_keeps_prior_name_and_notifies() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![SourceFile::from_bytes(
                "keep.txt",
                vec![0; 8],
            )]))
            .unwrap();
        let id = session.registry().records()[0].id();
        session
            .apply(Command::Rename(id, "   ".to_string()))
            .unwrap();
    }

    assert_eq!(driver.last_rows()[0].name, "keep.txt");
    assert!(driver
        .notices
        .iter()
        .any(|n| matches!(n, Notice::RenameRejected { .. })));
}

#[test]
fn session_download_writes_the_payload() {
    init_logging();
    let downloads =
        TempDir::new("downloads").expect("failed to create temp dir");
    let platform = LocalPlatform::new(downloads.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![SourceFile::from_bytes(
                "notes.txt",
                b"remember the milk".to_vec(),
            )]))
            .unwrap();
        let id = session.registry().records()[0].id();
        session.apply(Command::Download(id)).unwrap();
    }

    let written = fs::read(downloads.path().join("notes.txt")).unwrap();
    assert_eq!(written, b"remember the milk");
}

#[test]
fn session_share_falls_back_to_download_affordance() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![SourceFile::from_bytes(
                "slides.pdf",
                vec![0; 8],
            )]))
            .unwrap();
        let id = session.registry().records()[0].id();
        session.apply(Command::Share(id)).unwrap();
    }

    assert!(driver.notices.iter().any(|n| matches!(
        n,
        Notice::ShareFallback { name } if name == "slides.pdf"
    )));
}

#[test]
fn session_duplicate_of_unknown_id_surfaces_not_found() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();
    let unknown =
        RecordId::from_str("00000000-0000-0000-0000-000000000000").unwrap();

    let result = {
        let mut session = Session::new(&mut driver, &platform);
        session.apply(Command::Duplicate(unknown))
    };

    assert!(matches!(result, Err(StashError::NotFound(_))));
    assert!(driver.renders.is_empty());
}

#[test]
fn session_delete_of_unknown_id_is_benign() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();
    let unknown =
        RecordId::from_str("00000000-0000-0000-0000-000000000000").unwrap();

    {
        let mut session = Session::new(&mut driver, &platform);
        session
            .apply(Command::Ingest(vec![SourceFile::from_bytes(
                "only.txt",
                vec![0; 8],
            )]))
            .unwrap();
        session.apply(Command::Delete(unknown)).unwrap();
        assert_eq!(session.registry().len(), 1);
    }
}

#[test]
fn session_action_set_is_configurable() {
    init_logging();
    let dir = TempDir::new("stashlib").expect("failed to create temp dir");
    let platform = LocalPlatform::new(dir.path());
    let mut driver = RecordingDriver::default();

    // A surface without open/share affordances just configures them away.
    let session = Session::new(&mut driver, &platform).with_actions(
        ActionSet::new([
            Action::Duplicate,
            Action::Rename,
            Action::Download,
            Action::Delete,
            Action::Pin,
        ]),
    );

    assert!(!session.actions().contains(Action::Share));
    assert!(!session.actions().contains(Action::Open));
    assert!(session.actions().contains(Action::Rename));
}

#[test]
fn disk_ingest_end_to_end() {
    init_logging();
    let uploads = TempDir::new("uploads").expect("failed to create temp dir");
    fs::write(uploads.path().join("a.bin"), vec![1u8; 1024]).unwrap();
    fs::write(uploads.path().join("b.bin"), vec![2u8; 2048]).unwrap();

    let mut registry = Registry::new();
    let files = DiskSource::new(uploads.path())
        .gather()
        .expect("gather failed");
    registry.ingest(files);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.total_size(), 3072);
    assert_eq!(stashlib::format_size(registry.total_size()), "3.00 KB");
}
