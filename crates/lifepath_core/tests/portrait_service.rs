use lifepath_core::db::open_db_in_memory;
use lifepath_core::{
    AiProvider, CanonicalDate, PortraitService, ReportKey, ReportMode, SqliteReportCache,
    TextGenerator,
};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingGenerator {
    calls: RefCell<Vec<(usize, ReportMode)>>,
}

impl TextGenerator for &RecordingGenerator {
    fn provider(&self) -> AiProvider {
        AiProvider::DeepSeek
    }

    fn generate(&self, structure: &[String], mode: ReportMode) -> String {
        self.calls.borrow_mut().push((structure.len(), mode));
        format!("{} / {}", structure[0], mode)
    }
}

fn key(mode: ReportMode) -> ReportKey {
    ReportKey::new(77, CanonicalDate::from_dmy(1, 5, 2000).unwrap(), mode)
}

#[test]
fn miss_generates_and_caches_then_hit_skips_generator() {
    let conn = open_db_in_memory().unwrap();
    let generator = RecordingGenerator::default();
    let service = PortraitService::new(SqliteReportCache::try_new(&conn).unwrap(), &generator);

    let first = service.portrait(&key(ReportMode::Master)).unwrap();
    assert!(!first.from_cache);
    assert_eq!(first.text, "🔮 Число Судьбы: 8 / master");

    let second = service.portrait(&key(ReportMode::Master)).unwrap();
    assert!(second.from_cache);
    assert_eq!(second.text, first.text);

    assert_eq!(*generator.calls.borrow(), vec![(23, ReportMode::Master)]);
}

#[test]
fn each_mode_is_generated_separately() {
    let conn = open_db_in_memory().unwrap();
    let generator = RecordingGenerator::default();
    let service = PortraitService::new(SqliteReportCache::try_new(&conn).unwrap(), &generator);

    for mode in ReportMode::ALL {
        assert!(!service.portrait(&key(mode)).unwrap().from_cache);
    }
    assert_eq!(
        *generator.calls.borrow(),
        vec![
            (3, ReportMode::Default),
            (9, ReportMode::Deep),
            (23, ReportMode::Master)
        ]
    );
}
