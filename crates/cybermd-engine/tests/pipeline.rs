use std::time::{Duration, Instant};

use cybermd_engine::{
    BackgroundExecutor, Document, EditorSession, InlineExecutor, PassExecutor, PassLimits, Span, Status,
    StyleMap, StyleTag, ViewOp, diff, highlight, parse,
};
use pretty_assertions::assert_eq;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn typing_a_heading_paints_it_once_the_typist_pauses() {
    let t0 = Instant::now();
    let mut doc = Document::new();
    let mut session = EditorSession::new(InlineExecutor::default(), ms(300));
    let mut view = StyleMap::new(0);

    for (i, ch) in "# Hello".chars().enumerate() {
        doc.insert(doc.len(), &ch.to_string());
        session.on_text_changed(doc.snapshot(), t0 + ms(50 * i as u64));
        view.resize(doc.len());
        assert_eq!(session.tick(t0 + ms(50 * i as u64)), vec![]);
    }

    let quiet = session.next_deadline().unwrap();
    assert_eq!(quiet, t0 + ms(600));
    view.apply(&session.tick(quiet));
    assert_eq!(session.highlight_version(), Some(7));
    assert_eq!(
        view.runs(0..view.len()),
        vec![(Span::new(0, 7), Some(StyleTag::Heading1))]
    );
}

#[test]
fn view_tracks_edits_through_incremental_ops() {
    let t0 = Instant::now();
    let mut doc = Document::from_text("**bold** text");
    let mut session = EditorSession::new(InlineExecutor::default(), ms(0));
    let mut view = StyleMap::new(doc.len());

    doc.insert(0, "# ");
    session.on_text_changed(doc.snapshot(), t0);
    view.resize(doc.len());
    view.apply(&session.tick(t0));

    doc.delete(0..2);
    session.on_text_changed(doc.snapshot(), t0 + ms(1));
    view.resize(doc.len());
    view.apply(&session.tick(t0 + ms(1)));

    let mut fresh = StyleMap::new(doc.len());
    fresh.apply(&diff(&[], &highlight(&parse(&doc.text()))));
    assert_eq!(view, fresh);
    assert_eq!(view.style_at(0), Some(StyleTag::Bold));
}

fn tick_until_version<E: PassExecutor>(
    session: &mut EditorSession<E>,
    version: u64,
    mut now: Instant,
) -> Vec<ViewOp> {
    let mut ops = vec![];
    let give_up = Instant::now() + Duration::from_secs(10);
    while session.highlight_version() != Some(version) && Instant::now() < give_up {
        ops.extend(session.tick(now));
        std::thread::sleep(ms(1));
        now += ms(1);
    }
    ops
}

#[test]
fn background_session_delivers_latest_version() {
    let t0 = Instant::now();
    let executor = BackgroundExecutor::spawn(PassLimits::default()).unwrap();
    let mut session = EditorSession::new(executor, ms(10));
    let mut doc = Document::new();

    doc.insert(0, "`code`");
    session.on_text_changed(doc.snapshot(), t0);
    let first = tick_until_version(&mut session, 1, t0);
    assert_eq!(
        first,
        vec![ViewOp::Apply(Span::new(0, 6), StyleTag::InlineCode)]
    );

    doc.insert(doc.len(), " and *more*");
    session.on_text_changed(doc.snapshot(), t0 + ms(20));
    let second = tick_until_version(&mut session, 2, t0 + ms(20));

    assert_eq!(session.status(), &Status::Parsed { ranges: 2 });
    assert_eq!(
        second,
        vec![
            ViewOp::Clear(Span::new(0, 6)),
            ViewOp::Apply(Span::new(0, 6), StyleTag::InlineCode),
            ViewOp::Apply(Span::new(11, 17), StyleTag::Italic),
        ]
    );
    assert!(!session.is_busy());
}
