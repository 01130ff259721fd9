//! End-to-end tests for the index and the `Agenda` facade.

use agenda_core::{
  Error,
  appointment::{
    Appointment, AppointmentId, AppointmentKind, AppointmentPatch, AppointmentStatus, Modality,
    PresentationTag,
  },
  availability::{SlotAvailability, WeeklyAvailability, WorkingDay},
  calendar::{Direction, ViewMode},
  clock::FixedClock,
  config::ScheduleConfig,
  directory::Directory,
  draft::DraftKind,
  identity::SequentialIdentity,
  store::{AppointmentQuery, AppointmentStore},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use uuid::Uuid;

use crate::{Agenda, AppointmentIndex, slot::SlotState, view::CalendarViewState};

fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

fn wed() -> NaiveDate { d(2024, 6, 12) }

fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime { date.and_hms_opt(h, m, 0).unwrap() }

fn t(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

fn appt(n: u128, professional: &str, start: NaiveDateTime, end: NaiveDateTime) -> Appointment {
  Appointment {
    id:              AppointmentId(Uuid::from_u128(n)),
    start,
    end,
    title:           format!("patient {n}"),
    professional_id: professional.into(),
    kind:            AppointmentKind::Consultation {
      patient_id: None,
      modality:   Some(Modality::InPerson),
    },
    status:          AppointmentStatus::Scheduled,
  }
}

type TestAgenda = Agenda<Directory, SequentialIdentity, FixedClock>;

fn agenda() -> TestAgenda {
  Agenda::new(
    ScheduleConfig::default(),
    Directory::new()
      .with("p1", "Dr. Helena Souza")
      .with("p2", "Dr. Rafael Costa"),
    "p1".into(),
    SequentialIdentity::new(),
    FixedClock(at(wed(), 10, 30)),
  )
  .expect("default config is valid")
}

fn weekdays() -> WeeklyAvailability {
  WeeklyAvailability::new(
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
      .into_iter()
      .map(|weekday| WorkingDay {
        weekday,
        active: true,
        work_start: t(8),
        work_end: t(18),
        break_start: Some(t(12)),
        break_end: Some(t(13)),
      }),
  )
}

// ─── Index ───────────────────────────────────────────────────────────────────

#[test]
fn invalid_insert_leaves_index_unchanged() {
  let mut index = AppointmentIndex::new();
  index.insert(appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0))).unwrap();

  let inverted = appt(2, "p1", at(wed(), 11, 0), at(wed(), 10, 0));
  assert!(matches!(index.insert(inverted), Err(Error::InvalidRange { .. })));
  let empty = appt(3, "p1", at(wed(), 11, 0), at(wed(), 11, 0));
  assert!(index.insert(empty).is_err());

  assert_eq!(index.len(), 1);
}

#[test]
fn duplicate_ids_are_rejected() {
  let mut index = AppointmentIndex::new();
  index.insert(appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0))).unwrap();
  assert!(matches!(
    index.insert(appt(1, "p2", at(wed(), 11, 0), at(wed(), 12, 0))),
    Err(Error::DuplicateAppointment(_))
  ));
  assert_eq!(index.len(), 1);
}

#[test]
fn appointments_on_is_exact_regardless_of_insertion_order() {
  let thu = d(2024, 6, 13);
  let index = AppointmentIndex::from_appointments([
    appt(1, "p1", at(thu, 9, 0), at(thu, 10, 0)),
    appt(2, "p1", at(wed(), 15, 0), at(wed(), 16, 0)),
    appt(3, "p2", at(d(2024, 6, 11), 23, 0), at(wed(), 1, 0)),
    appt(4, "p1", at(wed(), 8, 0), at(wed(), 9, 0)),
  ])
  .unwrap();

  let ids: Vec<u128> = index
    .appointments_on(wed())
    .iter()
    .map(|a| a.id.0.as_u128())
    .collect();
  assert_eq!(ids, [2, 4]);
  assert_eq!(index.appointments_on(thu).len(), 1);
  assert!(index.appointments_on(d(2024, 6, 14)).is_empty());
}

#[test]
fn update_and_remove() {
  let mut index =
    AppointmentIndex::from_appointments([appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0))])
      .unwrap();
  let id = AppointmentId(Uuid::from_u128(1));

  let moved = index
    .update(id, AppointmentPatch::reschedule(at(wed(), 14, 0), at(wed(), 15, 0)))
    .unwrap();
  assert_eq!(moved.start, at(wed(), 14, 0));

  // A bad patch is rejected and leaves the record as it was.
  assert!(
    index
      .update(id, AppointmentPatch { end: Some(at(wed(), 13, 0)), ..Default::default() })
      .is_err()
  );
  assert_eq!(index.get(id).unwrap().end, at(wed(), 15, 0));

  let removed = index.remove(id).unwrap();
  assert_eq!(removed.id, id);
  assert!(index.is_empty());
  assert!(matches!(index.remove(id), Err(Error::AppointmentNotFound(_))));
}

#[test]
fn search_and_overlap_queries() {
  let mut index = AppointmentIndex::from_appointments([
    appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0)),
    appt(2, "p1", at(wed(), 9, 30), at(wed(), 10, 30)),
    appt(3, "p2", at(wed(), 9, 0), at(wed(), 10, 0)),
    appt(4, "p1", at(d(2024, 6, 20), 9, 0), at(d(2024, 6, 20), 10, 0)),
  ])
  .unwrap();
  index
    .set_status(AppointmentId(Uuid::from_u128(4)), AppointmentStatus::Canceled)
    .unwrap();

  let overlapping = index.overlapping(&"p1".into(), at(wed(), 9, 45), at(wed(), 11, 0));
  assert_eq!(overlapping.len(), 2);

  let p1_june = index.search(&AppointmentQuery {
    professional_id: Some("p1".into()),
    from: Some(d(2024, 6, 1)),
    to: Some(d(2024, 6, 30)),
    ..Default::default()
  });
  assert_eq!(p1_june.len(), 3);
  assert_eq!(index.in_range(wed(), wed()).len(), 3);
  assert_eq!(index.in_range(d(2024, 6, 13), d(2024, 6, 30)).len(), 1);

  let canceled = index.search(&AppointmentQuery {
    status: Some(AppointmentStatus::Canceled),
    ..Default::default()
  });
  assert_eq!(canceled.len(), 1);

  let remote = index.search(&AppointmentQuery {
    tag: Some(PresentationTag::Remote),
    ..Default::default()
  });
  assert!(remote.is_empty());

  let conflicts = index.conflicts_on(wed());
  assert_eq!(conflicts.len(), 1);
  assert_eq!(conflicts[0].0.id.0.as_u128(), 1);
  assert_eq!(conflicts[0].1.id.0.as_u128(), 2);
}

// ─── Agenda scenarios ────────────────────────────────────────────────────────

#[test]
fn week_of_a_wednesday_runs_sunday_to_saturday() {
  let view = agenda().render();
  assert_eq!(view.mode, ViewMode::Week);
  let dates: Vec<NaiveDate> = view.days.iter().map(|c| c.date).collect();
  let expected: Vec<NaiveDate> = (9..=15).map(|day| d(2024, 6, day)).collect();
  assert_eq!(dates, expected);
}

#[test]
fn slot_click_then_save_books_one_hour() {
  let mut agenda = agenda();
  let draft = agenda.on_slot_click(wed(), 14).unwrap();
  assert_eq!((draft.start, draft.end), (at(wed(), 14, 0), at(wed(), 15, 0)));
  assert_eq!(draft.professional_id.0, "p1");

  agenda.set_draft_title("Ana Lima").unwrap();
  let booking = agenda.save().unwrap();
  assert_eq!(booking.professional_name, "Dr. Helena Souza");
  assert_eq!(booking.tag, PresentationTag::InPerson);
  assert_eq!(agenda.slot_state(), SlotState::Idle);

  let view = agenda.render();
  let wednesday = view.days.iter().find(|c| c.date == wed()).unwrap();
  assert_eq!(wednesday.entries.len(), 1);
  let geometry = wednesday.entries[0].geometry.unwrap();
  assert_eq!(geometry.top_px, 40.0 + 6.0 * 60.0);
  assert_eq!(geometry.height_px, 60.0);
}

#[test]
fn remote_booking_gets_a_meeting_reference() {
  let mut agenda = agenda();
  agenda.on_slot_click(wed(), 9).unwrap();
  agenda.set_draft_title("Remote follow-up").unwrap();
  agenda.set_draft_kind(DraftKind::remote()).unwrap();
  let booking = agenda.save().unwrap();

  let reference = booking.appointment.kind.meeting_reference().unwrap();
  let prefix = agenda.config().meeting_uri_template.replace("{token}", "");
  assert!(reference.starts_with(&prefix));
  assert!(reference.len() > prefix.len());
  assert_eq!(booking.tag, PresentationTag::Remote);
}

#[test]
fn month_cell_drills_down_to_day() {
  let mut agenda = agenda();
  agenda.set_mode(ViewMode::Month);
  agenda.select_month_cell(d(2024, 6, 20)).unwrap();
  assert_eq!(
    agenda.view_state(),
    CalendarViewState { mode: ViewMode::Day, anchor: d(2024, 6, 20) }
  );

  let view = agenda.render();
  assert_eq!(view.days.len(), 1);
  assert_eq!(view.days[0].date, d(2024, 6, 20));
}

#[test]
fn double_booking_is_accepted() {
  let mut agenda = agenda()
    .with_appointments([appt(100, "p1", at(wed(), 14, 0), at(wed(), 15, 0))])
    .unwrap();

  agenda.on_slot_click(wed(), 14).unwrap();
  agenda.set_draft_title("Second patient").unwrap();
  agenda.save().unwrap();

  assert_eq!(agenda.index().appointments_on(wed()).len(), 2);
  assert_eq!(agenda.conflicts_on(wed()).len(), 1);
}

// ─── Agenda behaviour ────────────────────────────────────────────────────────

#[test]
fn render_is_idempotent() {
  let agenda = agenda()
    .with_appointments([
      appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0)),
      appt(2, "p2", at(d(2024, 6, 14), 16, 0), at(d(2024, 6, 14), 17, 30)),
    ])
    .unwrap();
  let first = agenda.render();
  let second = agenda.render();
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_value(&first).unwrap(),
    serde_json::to_value(&second).unwrap()
  );
}

#[test]
fn slots_are_unavailable_in_month_view() {
  let mut agenda = agenda();
  agenda.set_mode(ViewMode::Month);
  assert!(matches!(
    agenda.on_slot_click(wed(), 14),
    Err(Error::SlotsUnavailable(ViewMode::Month))
  ));
  assert!(agenda.on_grid_click(wed(), 400.0).is_err());
  assert!(agenda.draft().is_none());
}

#[test]
fn switching_to_month_discards_the_draft() {
  let mut agenda = agenda();
  agenda.on_slot_click(wed(), 10).unwrap();
  agenda.set_mode(ViewMode::Day);
  assert!(agenda.draft().is_some());
  agenda.set_mode(ViewMode::Month);
  assert!(agenda.draft().is_none());
}

#[test]
fn quick_create_from_month_opens_day_view_today() {
  let mut agenda = agenda();
  agenda.set_mode(ViewMode::Month);
  agenda.navigate(Direction::Next);
  let draft = agenda.on_quick_create().unwrap();
  assert_eq!(draft.start, at(wed(), 10, 0));
  assert_eq!(
    agenda.view_state(),
    CalendarViewState { mode: ViewMode::Day, anchor: wed() }
  );
}

#[test]
fn quick_create_after_hours_changes_nothing() {
  let mut agenda = Agenda::new(
    ScheduleConfig::default(),
    Directory::new().with("p1", "Dr. Helena Souza"),
    "p1".into(),
    SequentialIdentity::new(),
    FixedClock(at(wed(), 22, 15)),
  )
  .unwrap();
  agenda.set_mode(ViewMode::Month);
  let before = agenda.view_state();

  assert!(matches!(agenda.on_quick_create(), Err(Error::TimeOutOfRange { .. })));
  assert_eq!(agenda.view_state(), before);
  assert_eq!(agenda.slot_state(), SlotState::Idle);
  assert!(agenda.save().is_err());
  assert!(agenda.index().is_empty());
}

#[test]
fn navigation_and_today() {
  let mut agenda = agenda();
  agenda.navigate(Direction::Next);
  assert_eq!(agenda.view_state().anchor, d(2024, 6, 19));
  agenda.set_mode(ViewMode::Month);
  agenda.navigate(Direction::Prev);
  assert_eq!(agenda.view_state().anchor, d(2024, 5, 19));
  agenda.jump_to_today();
  assert_eq!(agenda.view_state().anchor, wed());
  assert_eq!(agenda.view_state().mode, ViewMode::Month);
}

#[test]
fn edit_lifecycle_updates_in_place() {
  let mut agenda = agenda()
    .with_appointments([appt(7, "p1", at(wed(), 9, 0), at(wed(), 10, 0))])
    .unwrap();
  let id = AppointmentId(Uuid::from_u128(7));

  let draft = agenda.begin_edit(id).unwrap();
  assert_eq!(draft.editing, Some(id));
  agenda
    .set_draft_range(at(wed(), 11, 0), at(wed(), 11, 45))
    .unwrap();
  agenda.set_draft_professional("p2".into()).unwrap();
  let flags = agenda.edit_draft(|d| d.title = "Ana Lima".into()).unwrap();
  assert!(flags.range_valid);
  let booking = agenda.save().unwrap();

  assert_eq!(booking.appointment.id, id);
  assert_eq!(booking.professional_name, "Dr. Rafael Costa");
  assert_eq!(agenda.index().len(), 1);
  let stored = agenda.index().get(id).unwrap();
  assert_eq!((stored.start, stored.end), (at(wed(), 11, 0), at(wed(), 11, 45)));

  assert!(matches!(
    agenda.begin_edit(AppointmentId(Uuid::from_u128(99))),
    Err(Error::AppointmentNotFound(_))
  ));
}

#[test]
fn begin_edit_from_month_drills_to_the_appointment_day() {
  let friday = d(2024, 6, 28);
  let mut agenda = agenda()
    .with_appointments([appt(7, "p1", at(friday, 9, 0), at(friday, 10, 0))])
    .unwrap();
  agenda.set_mode(ViewMode::Month);
  agenda.begin_edit(AppointmentId(Uuid::from_u128(7))).unwrap();
  assert_eq!(
    agenda.view_state(),
    CalendarViewState { mode: ViewMode::Day, anchor: friday }
  );
}

#[test]
fn status_and_removal() {
  let mut agenda = agenda()
    .with_appointments([appt(1, "p1", at(wed(), 9, 0), at(wed(), 10, 0))])
    .unwrap();
  let id = AppointmentId(Uuid::from_u128(1));

  let done = agenda.set_status(id, AppointmentStatus::Completed).unwrap();
  assert_eq!(done.status, AppointmentStatus::Completed);
  agenda.remove(id).unwrap();
  assert!(agenda.render().days.iter().all(|c| c.entries.is_empty()));
}

#[test]
fn availability_flags_slots_and_drafts() {
  let mut agenda = agenda().with_availability(weekdays());
  agenda.set_mode(ViewMode::Day);

  let view = agenda.render();
  let slots = &view.days[0].slots;
  assert_eq!(slots.len(), 11);
  assert_eq!(slots[0], SlotAvailability::Available);
  assert_eq!(slots[4], SlotAvailability::OnBreak);
  assert_eq!(slots[10], SlotAvailability::OutsideHours);

  let flags = agenda.on_slot_click(wed(), 12).unwrap().flags();
  assert_eq!(flags.availability, Some(SlotAvailability::OnBreak));

  agenda.navigate(Direction::Prev);
  agenda.navigate(Direction::Prev);
  agenda.navigate(Direction::Prev);
  let sunday = agenda.render();
  assert!(sunday.days[0].slots.iter().all(|s| *s == SlotAvailability::DayOff));
}

#[test]
fn now_indicator_follows_visibility() {
  let mut agenda = agenda();
  assert_eq!(agenda.now_indicator(), Some((wed(), 40.0 + 2.5 * 60.0)));
  agenda.navigate(Direction::Next);
  assert_eq!(agenda.now_indicator(), None);
  agenda.jump_to_today();
  agenda.set_mode(ViewMode::Month);
  assert_eq!(agenda.now_indicator(), None);
}

#[test]
fn invalid_config_is_rejected() {
  let config = ScheduleConfig { day_start: 19, day_end: 8, ..Default::default() };
  let result = Agenda::new(
    config,
    Directory::new(),
    "p1".into(),
    SequentialIdentity::new(),
    FixedClock(at(wed(), 10, 0)),
  );
  assert!(matches!(result, Err(Error::InvalidConfig(_))));

  let config = ScheduleConfig { slot_minutes: 0, ..Default::default() };
  let result = Agenda::new(
    config,
    Directory::new(),
    "p1".into(),
    SequentialIdentity::new(),
    FixedClock(at(wed(), 10, 0)),
  );
  assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
