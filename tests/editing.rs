use detect_annotate::labels::{LabelControl, CUSTOM_LABEL};
use detect_annotate::{BoundingBox, BoxEditor, LabelSource, Session};

fn detections() -> Vec<BoundingBox> {
    vec![
        BoundingBox::new(20.0, 30.0, 220.0, 330.0, "person"),
        BoundingBox::new(300.0, 40.0, 500.0, 200.0, "car"),
    ]
}

fn labels() -> LabelControl {
    LabelControl::new(vec!["person".into(), "car".into(), "cat".into()])
}

#[test]
fn load_replaces_instead_of_merging() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    assert_eq!(editor.boxes(), detections().as_slice());

    let second = vec![BoundingBox::new(1.0, 1.0, 9.0, 9.0, "dog")];
    editor.load_boxes(second.clone());
    assert_eq!(editor.boxes(), second.as_slice());
}

#[test]
fn drawing_commits_on_release() {
    let mut editor = BoxEditor::new();
    let mut labels = labels();
    labels.select("cat");

    editor.on_pointer_down(10.0, 10.0, &labels);
    editor.on_pointer_move(30.0, 40.0);
    editor.on_pointer_move(50.0, 60.0);
    assert!(editor.boxes().is_empty());

    editor.on_pointer_up();
    assert_eq!(
        editor.boxes(),
        &[BoundingBox::new(10.0, 10.0, 50.0, 60.0, "cat")]
    );
    assert_eq!(editor.session(), &Session::Idle);
}

#[test]
fn drawing_with_custom_label_uses_free_text() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    let mut labels = labels();
    editor.on_label_control_change(&mut labels, CUSTOM_LABEL);
    labels.custom_text = "traffic cone".into();
    assert_eq!(labels.current_label(), "traffic cone");

    editor.on_pointer_down(600.0, 600.0, &labels);
    editor.on_pointer_move(640.0, 660.0);
    editor.on_pointer_up();
    assert_eq!(editor.boxes()[2].label, "traffic cone");
}

#[test]
fn drag_there_and_back_restores_rectangle() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    let labels = labels();

    editor.on_pointer_down(100.0, 100.0, &labels);
    editor.on_pointer_move(137.0, 81.0);
    editor.on_pointer_up();
    let moved = editor.boxes()[0].clone();
    assert_eq!(moved.width(), 200.0);
    assert_eq!(moved.height(), 300.0);

    editor.on_pointer_down(137.0, 81.0, &labels);
    editor.on_pointer_move(100.0, 100.0);
    editor.on_pointer_up();
    assert_eq!(editor.boxes()[0], detections()[0]);
}

#[test]
fn resize_keeps_first_corner() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    let labels = labels();

    editor.on_pointer_down(495.0, 100.0, &labels);
    assert_eq!(editor.session(), &Session::Resizing { index: 1 });
    editor.on_pointer_move(450.0, 180.0);
    editor.on_pointer_move(560.0, 250.0);
    editor.on_pointer_up();

    let b = &editor.boxes()[1];
    assert_eq!((b.x0, b.y0), (300.0, 40.0));
    assert_eq!((b.x1, b.y1), (560.0, 250.0));
    assert_eq!(editor.selected(), None);
}

#[test]
fn custom_selection_never_touches_boxes() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    let mut labels = labels();

    editor.on_pointer_down(100.0, 100.0, &labels);
    let rev = editor.revision();
    editor.on_label_control_change(&mut labels, CUSTOM_LABEL);
    assert!(labels.custom_visible());
    assert_eq!(editor.boxes(), detections().as_slice());
    assert_eq!(editor.revision(), rev);
}

#[test]
fn preset_selection_relabels_held_box() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    let mut labels = labels();

    editor.on_pointer_down(400.0, 100.0, &labels);
    assert_eq!(editor.selected(), Some(1));
    let rev = editor.revision();
    editor.on_label_control_change(&mut labels, "cat");
    assert!(!labels.custom_visible());
    assert_eq!(editor.boxes()[1].label, "cat");
    assert_eq!(editor.boxes()[0].label, "person");
    assert!(editor.revision() > rev);
}

#[test]
fn overlapping_boxes_pick_first_in_order() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(vec![
        BoundingBox::new(0.0, 0.0, 100.0, 100.0, "a"),
        BoundingBox::new(40.0, 40.0, 140.0, 140.0, "b"),
    ]);
    editor.on_pointer_down(60.0, 60.0, &labels());
    assert_eq!(editor.selected(), Some(0));
}

#[test]
fn click_on_boundary_starts_a_new_box() {
    let mut editor = BoxEditor::new();
    editor.load_boxes(detections());
    editor.on_pointer_down(20.0, 100.0, &labels());
    assert!(editor.pending().is_some());
    editor.on_pointer_up();
    assert_eq!(editor.boxes().len(), 3);
    assert_eq!(editor.boxes()[2], BoundingBox::degenerate(20.0, 100.0, "person"));
}
