// tests/index_tests.rs
use adv2_rs::testlib::{FakeAdvLibrary, FAKE_E_IO_ERROR};
use adv2_rs::*;
use tempfile::NamedTempFile;

fn open_reference() -> (NamedTempFile, Adv2Reader<FakeAdvLibrary>) {
    let file = NamedTempFile::new().unwrap();
    let reader = Adv2Reader::open(file.path(), FakeAdvLibrary::reference()).unwrap();
    (file, reader)
}

#[test]
fn test_index_covers_every_frame_in_order() {
    let (_file, mut reader) = open_reference();
    let index = reader.read_frame_index().unwrap();

    assert_eq!(index.main.len(), 102);
    assert!(index.calibration.is_empty());

    let mut expected_offset = 0u64;
    for (frame_number, entry) in index.main.iter().enumerate() {
        assert_eq!(entry.elapsed_ticks, frame_number as u64 * 40);
        assert_eq!(entry.frame_offset, expected_offset);
        assert_eq!(entry.bytes_count, 151_204);
        expected_offset += entry.bytes_count as u64;
    }

    // Elapsed ticks ascend with the frame number.
    assert!(index
        .main
        .windows(2)
        .all(|pair| pair[0].elapsed_ticks < pair[1].elapsed_ticks));
}

#[test]
fn test_index_rebuild_is_idempotent() {
    let (_file, mut reader) = open_reference();
    let first = reader.read_frame_index().unwrap();
    let second = reader.read_frame_index().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_index_failure_returns_no_partial_index() {
    let file = NamedTempFile::new().unwrap();
    let mut library = FakeAdvLibrary::reference();
    library.fail_index(FAKE_E_IO_ERROR);
    let mut reader = Adv2Reader::open(file.path(), library).unwrap();

    match reader.read_frame_index() {
        Err(Adv2Error::IndexUnavailable { status, message }) => {
            assert_eq!(status, Status::new(0x8100_0002));
            assert!(message.starts_with("A low-level input/output error"));
        }
        other => panic!("expected IndexUnavailable, got {other:?}"),
    }
}

#[test]
fn test_index_seek_targets_match_frame_headers() {
    let (_file, mut reader) = open_reference();
    let index = reader.read_frame_index().unwrap();

    for frame_number in [0u32, 51, 101] {
        let frame = reader.main_frame_pixels(frame_number).unwrap();
        let entry = &index.main[frame_number as usize];
        assert_eq!(entry.elapsed_ticks, frame.info.start_ticks);
        assert_eq!(entry.bytes_count, frame.info.raw_data_block_size);
    }
}
