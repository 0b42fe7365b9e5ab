// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use chrono::Utc;
use farewell_lens::application::board::Board;
use farewell_lens::application::port::CardStore;
use farewell_lens::config;
use farewell_lens::domain::card::{Author, NewCard};
use farewell_lens::domain::viewport::{Vector2, ViewportController, ZoomBounds};
use farewell_lens::domain::ImageSource;
use farewell_lens::i18n::I18n;
use farewell_lens::infrastructure::{FileStore, MemoryStore};
use tempfile::tempdir;

fn loaded_viewer(width: f32, height: f32) -> ViewportController {
    let mut viewer = ViewportController::new(ZoomBounds::default());
    viewer.open(ImageSource::parse("https://example.com/goodbye.jpg"));
    assert!(viewer.on_natural_size_known(width, height, 800.0, 600.0));
    viewer
}

#[test]
fn large_image_is_fitted_then_zoomed_and_panned() {
    let mut viewer = loaded_viewer(1600.0, 1200.0);
    assert_abs_diff_eq!(viewer.zoom_factor(), 0.5);
    assert!(!viewer.can_pan());

    // Dragging does nothing until the image is magnified.
    viewer.begin_drag(Vector2::new(10.0, 10.0));
    assert!(!viewer.is_dragging());

    for _ in 0..4 {
        viewer.zoom_in();
    }
    assert_abs_diff_eq!(viewer.zoom_factor(), 1.5);
    assert!(viewer.can_pan());

    viewer.begin_drag(Vector2::new(100.0, 100.0));
    viewer.continue_drag(Vector2::new(140.0, 70.0));
    viewer.end_drag();
    assert_eq!(viewer.pan_offset(), Vector2::new(40.0, -30.0));

    viewer.reset_view();
    assert_abs_diff_eq!(viewer.zoom_factor(), 1.0);
    assert_eq!(viewer.pan_offset(), Vector2::ZERO);
}

#[test]
fn small_image_is_never_magnified_by_the_fit() {
    let viewer = loaded_viewer(200.0, 100.0);
    assert_abs_diff_eq!(viewer.zoom_factor(), 1.0);
    assert_abs_diff_eq!(viewer.opacity(), 1.0);
}

#[test]
fn zoom_is_clamped_at_both_ends() {
    let mut viewer = loaded_viewer(400.0, 300.0);
    for _ in 0..20 {
        viewer.wheel(1.0);
    }
    assert_abs_diff_eq!(viewer.zoom_factor(), 3.0);
    assert!(!viewer.can_zoom_in());

    for _ in 0..20 {
        viewer.wheel(-1.0);
    }
    assert_abs_diff_eq!(viewer.zoom_factor(), 0.5);
    assert!(!viewer.can_zoom_out());
}

#[test]
fn reopening_starts_a_fresh_session() {
    let mut viewer = loaded_viewer(400.0, 300.0);
    viewer.zoom_in();
    viewer.close();
    viewer.open(ImageSource::parse("/tmp/other.png"));

    assert!(!viewer.is_loaded());
    assert_abs_diff_eq!(viewer.zoom_factor(), 1.0);
    assert_abs_diff_eq!(viewer.opacity(), 0.0);
}

#[test]
fn optimistic_board_rolls_back_failed_store_calls() {
    let store = MemoryStore::default();
    let author = Author::sign_in("Ada", "ada@example.com").expect("valid author");
    let mut board = Board::default();

    let new = NewCard::compose(&author, "So long!", None).expect("valid card");
    let (temp_id, _undo) = board.apply_create(new.clone(), Utc::now());
    let stored = store.create(new).expect("create");
    board.confirm_create(temp_id, stored.clone());
    assert_eq!(board.len(), 1);

    // The store does not know this id, so the update fails and is undone.
    store.delete(stored.id).expect("delete");
    let undo = board
        .apply_update(stored.id, "Edited".to_string())
        .expect("card on board");
    assert!(store.update_content(stored.id, "Edited".to_string()).is_err());
    board.rollback(undo);
    assert_eq!(
        board.get(stored.id).map(|card| card.content.as_str()),
        Some("So long!")
    );
}

#[test]
fn file_store_keeps_cards_and_images_across_reopen() {
    let dir = tempdir().expect("temp dir");
    let author = Author::sign_in("Ana", "").expect("valid author");

    let card_id = {
        let store = FileStore::open_at(dir.path()).expect("open store");
        let image = store.upload_image("farewell.png", b"not really a png").expect("upload");
        let new = NewCard::compose(&author, "Bon voyage", Some(image)).expect("valid card");
        store.create(new).expect("create").id
    };

    let reopened = FileStore::open_at(dir.path()).expect("reopen store");
    let cards = reopened.list().expect("list");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, card_id);
    assert_eq!(cards[0].email, None);

    let image = cards[0].image.as_ref().and_then(ImageSource::as_path).expect("local image");
    assert!(image.starts_with(dir.path().join("images")));
    assert!(image.exists());
}

#[test]
fn language_from_config_file_drives_i18n() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    std::fs::write(&path, "[general]\nlanguage = \"fr\"\n").expect("write config");

    let loaded = config::load_from_path(&path).expect("load config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(
        i18n.tr_with_args("image-modal-caption", &[("name", "Ana")]),
        "Image du message d'au revoir de Ana"
    );

    // The command line wins over the file.
    let i18n = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n.tr("board-title"), "Farewell messages");
}
