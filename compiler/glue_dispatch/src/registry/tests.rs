#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::testing::RecordingFactory;
use glue_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn registry() -> BackendRegistry {
    BackendRegistry::build(&mut RecordingFactory::new())
}

#[test]
fn every_target_has_exactly_one_backend() {
    let resolved: Vec<(&str, &str)> = TargetLanguage::ALL
        .into_iter()
        .map(|t| (t.as_str(), BackendId::for_target(t).as_str()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("C", "c"),
            ("Ada", "ada"),
            ("SDL", "sdl"),
            ("OG", "og"),
            ("QGenAda", "qgenada"),
            ("rtds", "rtds"),
            ("gui", "gui"),
            ("python", "python"),
            ("QGenC", "qgenc"),
            ("Scade6", "scade6"),
            ("Simulink", "simulink"),
            ("vhdl", "c"),
            ("gui_ri", "c"),
            ("gui_pi", "c"),
            ("rhapsody", "c"),
        ]
    );
}

#[test]
fn lifecycle_mode_follows_the_backend_identity() {
    let mut registry = registry();
    for target in TargetLanguage::ALL {
        let handle = registry.resolve(target);
        let expected_async = matches!(
            target.codec_target(),
            TargetLanguage::Ada
                | TargetLanguage::C
                | TargetLanguage::Og
                | TargetLanguage::QGenAda
                | TargetLanguage::Rtds
                | TargetLanguage::Sdl
        );
        assert_eq!(
            matches!(handle, BackendHandle::Asynchronous { .. }),
            expected_async,
            "{target}"
        );
        assert_eq!(handle.id(), BackendId::for_target(target));
    }
}

#[test]
fn whole_catalog_backends() {
    let whole: Vec<_> = AsyncBackendId::ALL
        .into_iter()
        .filter(|id| id.whole_catalog())
        .collect();
    assert_eq!(
        whole,
        vec![AsyncBackendId::Ada, AsyncBackendId::C, AsyncBackendId::QGenAda]
    );
}

#[test]
fn resolve_by_name_is_case_insensitive() {
    let mut registry = registry();
    let handle = registry.resolve_name("SIMULINK").unwrap();
    assert_eq!(handle.id(), BackendId::Sync(SyncBackendId::Simulink));
}

#[test]
fn resolve_unknown_name_fails() {
    let mut registry = registry();
    let err = registry.resolve_name("Lustre").err().unwrap();
    assert_eq!(err.code(), ErrorCode::E0001);
    match err {
        DispatchError::UnsupportedTarget(source) => assert_eq!(source.identifier, "Lustre"),
        other => panic!("expected an unsupported target, got {other:?}"),
    }
}

#[test]
fn sync_many_keeps_requested_order_and_drops_repeats() {
    let mut registry = registry();
    let ids: Vec<SyncBackendId> = registry
        .sync_many(&[
            SyncBackendId::PySide,
            SyncBackendId::Python,
            SyncBackendId::PySide,
        ])
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, vec![SyncBackendId::PySide, SyncBackendId::Python]);
}
