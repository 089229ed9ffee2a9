use std::sync::Arc;

use gntools::geonis::i18n::ENV_LANGUAGE;
use gntools::geonis::{
    EleDefinitions, EnvLanguageProvider, Language, LanguageCache, LanguageProvider,
    LanguageSource,
};
use gntools::workspace::{MemoryWorkspace, TableData};
use serial_test::serial;

fn workspace() -> MemoryWorkspace {
    MemoryWorkspace::new().with_table(
        "GNELE_DEFINITION",
        TableData::new(["NAME", "VALUE"]).with_row([Some("tablename_cable"), Some("kabel")]),
    )
}

#[test]
#[serial]
fn test_env_provider_reads_variable() {
    std::env::set_var("GNTOOLS_TEST_LANGUAGE", "FR");
    let provider = EnvLanguageProvider::new("GNTOOLS_TEST_LANGUAGE");
    assert_eq!(provider.get_language(), Some(Language::French));

    std::env::set_var("GNTOOLS_TEST_LANGUAGE", "rumantsch");
    assert_eq!(provider.get_language(), None);

    std::env::remove_var("GNTOOLS_TEST_LANGUAGE");
    assert_eq!(provider.get_language(), None);
}

#[test]
#[serial]
fn test_private_cache_is_filled_once() {
    std::env::set_var("GNTOOLS_TEST_LANGUAGE", "it");
    let source = LanguageSource::new(
        Arc::new(LanguageCache::new()),
        Arc::new(EnvLanguageProvider::new("GNTOOLS_TEST_LANGUAGE")),
    );
    let ele = EleDefinitions::with_language(&workspace(), source.clone()).unwrap();
    assert_eq!(ele.fields().description(), "description_i");

    // Later changes of the environment are not seen
    std::env::set_var("GNTOOLS_TEST_LANGUAGE", "en");
    assert_eq!(ele.fields().description(), "description_i");
    assert_eq!(source.language(), Some(Language::Italian));
    std::env::remove_var("GNTOOLS_TEST_LANGUAGE");
}

// The only test in this binary that touches the process-wide language
#[test]
#[serial]
fn test_process_language_is_shared_by_all_definitions() {
    std::env::set_var(ENV_LANGUAGE, "en");
    let first = EleDefinitions::load(&workspace()).unwrap();
    assert_eq!(first.fields().description(), "description_e");
    assert!(LanguageSource::process().cache().is_initialized());

    std::env::set_var(ENV_LANGUAGE, "fr");
    let second = EleDefinitions::load(&workspace()).unwrap();
    assert_eq!(second.fields().description(), "description_e");
    assert_eq!(first.fields().description(), "description_e");
    std::env::remove_var(ENV_LANGUAGE);
}
