use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use combat_core::{
    Ability, Action, AttributeKind, Battlefield, Effect, Faction, Item, ItemId, Position,
    Resolution, Unit, UnitId, resolution,
};
use combat_runtime::machine::states::{
    DisplayPostCombatStats, EnemyPerformAction, InitTurn, PlayerPerformAction, TurnOver,
};
use combat_runtime::{
    ActionPerformer, Collaborators, CombatCommand, CombatEvent, CombatHandle, CombatState,
    CombatStateMachine, Encounter, EncounterOutcome, MusicController, Presentation,
    ResolvingPerformer, Result, RuntimeConfig, RuntimeError, Scheduler, StateContext, StateKind,
    StateMachineError,
};
use tokio::sync::broadcast;

fn soldier(id: u32, faction: Faction, x: i32, z: i32, speed: i32) -> Unit {
    Unit::new(UnitId(id), format!("soldier-{id}"), faction, Position::new(x, z))
        .with_attribute(AttributeKind::Health, 12)
        .with_attribute(AttributeKind::Attack, 5)
        .with_attribute(AttributeKind::Defense, 1)
        .with_attribute(AttributeKind::Movement, 3)
        .with_attribute(AttributeKind::Speed, speed)
}

/// Player #1 at (1, 1) next to enemy #2 at (2, 1); the player is faster.
fn duel() -> Encounter {
    let mut field = Battlefield::new(6, 6);
    field.spawn(soldier(1, Faction::Player, 1, 1, 9)).expect("spawn player");
    field.spawn(soldier(2, Faction::Enemy, 2, 1, 1)).expect("spawn enemy");
    Encounter::new(field)
}

fn machine(
    encounter: Encounter,
    collaborators: Collaborators,
) -> (CombatStateMachine, CombatHandle) {
    CombatStateMachine::new(encounter, collaborators, RuntimeConfig::default())
}

fn drain(rx: &mut broadcast::Receiver<CombatEvent>) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[derive(Default)]
struct CountingScheduler {
    ticks: AtomicUsize,
}

#[async_trait]
impl Scheduler for CountingScheduler {
    async fn next_tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

/// Performer that never finishes.
#[derive(Default)]
struct StallingPerformer {
    started: AtomicBool,
    finished: AtomicBool,
}

#[async_trait]
impl ActionPerformer for StallingPerformer {
    async fn perform(
        &self,
        _action: &mut Action,
        _actor: UnitId,
        _field: &mut Battlefield,
    ) -> Result<Resolution> {
        self.started.store(true, Ordering::SeqCst);
        std::future::pending::<()>().await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(Resolution::default())
    }
}

#[tokio::test]
async fn turn_over_with_no_enemies_left_goes_to_post_combat_stats() {
    let mut encounter = duel();
    if let Some(enemy) = encounter.field.unit_mut(UnitId(2)) {
        enemy.mark_defeated();
    }
    encounter.field.clear_tile(Position::new(2, 1));
    encounter.highlighted_unit = Some(UnitId(1));
    let order_before = encounter.turn_order.order().clone();

    let (mut machine, handle) = machine(encounter, Collaborators::default());
    let mut events = handle.subscribe();
    machine.change_state::<TurnOver>().expect("queue turn over");
    machine.advance().await.expect("enter turn over");

    assert_eq!(machine.current_state(), Some(StateKind::TurnOver));
    assert_eq!(machine.pending_state(), Some(StateKind::DisplayPostCombatStats));
    assert_eq!(machine.encounter().outcome, Some(EncounterOutcome::Victory));
    assert_eq!(machine.encounter().turn_order.turns_finished(), 0);
    assert_eq!(machine.encounter().turn_order.order(), &order_before);
    assert!(
        !drain(&mut events)
            .iter()
            .any(|event| matches!(event, CombatEvent::TurnFinished { .. }))
    );

    machine.advance().await.expect("enter post combat");
    assert!(machine.is_finished());
    let summary = machine.encounter().summary.clone().expect("summary");
    assert_eq!(summary.outcome, Some(EncounterOutcome::Victory));
}

#[tokio::test]
async fn turn_over_with_enemies_left_finishes_the_turn_once() {
    let mut encounter = duel();
    encounter.highlighted_unit = Some(UnitId(1));
    assert_eq!(encounter.turn_order.all_units(), &[UnitId(1), UnitId(2)]);

    let (mut machine, handle) = machine(encounter, Collaborators::default());
    let mut events = handle.subscribe();
    machine.change_state::<TurnOver>().expect("queue turn over");
    machine.advance().await.expect("enter turn over");

    assert_eq!(machine.pending_state(), Some(StateKind::InitTurn));
    let encounter = machine.encounter();
    assert_eq!(encounter.turn_order.turns_finished(), 1);
    assert_eq!(encounter.turn_order.all_units(), &[UnitId(2), UnitId(1)]);
    assert_eq!(encounter.highlighted_unit, None);
    assert!(encounter.outcome.is_none());

    let finished: Vec<_> = drain(&mut events)
        .into_iter()
        .filter(|event| matches!(event, CombatEvent::TurnFinished { .. }))
        .collect();
    assert_eq!(finished, vec![CombatEvent::TurnFinished { unit: UnitId(1) }]);
}

#[tokio::test]
async fn turn_over_waits_exactly_one_tick() {
    let scheduler = Arc::new(CountingScheduler::default());
    let collaborators = Collaborators::default().with_scheduler(scheduler.clone());
    let mut encounter = duel();
    encounter.highlighted_unit = Some(UnitId(1));

    let (mut machine, _handle) = machine(encounter, collaborators);
    machine.change_state::<TurnOver>().expect("queue turn over");
    machine.advance().await.expect("enter turn over");
    assert_eq!(scheduler.ticks.load(Ordering::SeqCst), 1);

    machine.advance().await.expect("enter init turn");
    assert_eq!(scheduler.ticks.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn turn_over_reports_tension_changes() {
    let mut encounter = duel();
    encounter.highlighted_unit = Some(UnitId(1));
    let (mut machine, handle) = machine(encounter, Collaborators::default());
    let mut events = handle.subscribe();

    machine.change_state::<TurnOver>().expect("queue turn over");
    machine.advance().await.expect("enter turn over");

    assert!(machine.encounter().tense);
    assert!(
        drain(&mut events).contains(&CombatEvent::TensionChanged { tense: true })
    );
}

#[tokio::test]
async fn second_transition_request_is_rejected() {
    let (mut machine, _handle) = machine(duel(), Collaborators::default());
    machine.change_state::<TurnOver>().expect("first request");

    let err = machine.change_state::<InitTurn>().expect_err("second request");
    assert!(matches!(
        err,
        RuntimeError::StateMachine(StateMachineError::TransitionInFlight {
            pending: StateKind::TurnOver
        })
    ));
    assert_eq!(machine.pending_state(), Some(StateKind::TurnOver));
}

/// State that asks for two transitions from one entry.
#[derive(Default)]
struct Indecisive;

#[async_trait]
impl CombatState for Indecisive {
    fn kind(&self) -> StateKind {
        StateKind::EnemySelected
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        ctx.change_state::<TurnOver>()?;
        ctx.change_state::<DisplayPostCombatStats>()
    }
}

#[tokio::test]
async fn state_cannot_queue_two_transitions() {
    let (mut machine, _handle) = machine(duel(), Collaborators::default());
    machine.change_state::<Indecisive>().expect("queue");

    let err = machine.advance().await.expect_err("reentrant transition");
    assert!(matches!(
        err,
        RuntimeError::StateMachine(StateMachineError::TransitionInFlight { .. })
    ));
    assert_eq!(machine.pending_state(), Some(StateKind::TurnOver));
}

#[tokio::test]
async fn abort_cancels_a_suspended_perform() {
    let performer = Arc::new(StallingPerformer::default());
    let collaborators = Collaborators::default().with_performer(performer.clone());

    let mut encounter = duel();
    let mut action = Action::ability(Ability::basic_attack());
    resolution::select_target(&mut action, UnitId(1), &encounter.field, Position::new(2, 1))
        .expect("aim");
    encounter.action = Some(action);
    encounter.highlighted_unit = Some(UnitId(1));

    let (mut machine, handle) = machine(encounter, collaborators);
    handle.abort().await.expect("send abort");
    machine.change_state::<PlayerPerformAction>().expect("queue perform");
    machine.advance().await.expect("perform interrupted");

    assert!(performer.started.load(Ordering::SeqCst));
    assert!(!performer.finished.load(Ordering::SeqCst));
    assert_eq!(machine.current_state(), Some(StateKind::PlayerPerformAction));
    assert_eq!(machine.pending_state(), Some(StateKind::DisplayPostCombatStats));
    assert_eq!(machine.encounter().outcome, Some(EncounterOutcome::Aborted));
    assert_eq!(machine.encounter().field.unit(UnitId(2)).map(Unit::health), Some(12));

    let summary = machine.run().await.expect("finish");
    assert_eq!(summary.outcome, Some(EncounterOutcome::Aborted));
    assert_eq!(summary.actions, 0);
    assert!(!performer.finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn player_commands_drive_an_attack() {
    let (mut machine, handle) = machine(duel(), Collaborators::default());
    let mut events = handle.subscribe();
    machine.start().expect("start");
    machine.advance().await.expect("init turn");
    machine.advance().await.expect("player selected");
    assert_eq!(machine.current_state(), Some(StateKind::PlayerSelected));
    assert!(drain(&mut events).contains(&CombatEvent::AwaitingCommand { unit: UnitId(1) }));

    handle
        .send(CombatCommand::SelectTarget(Position::new(2, 1)))
        .await
        .expect("send");
    machine.advance().await.expect("rejected command");
    assert_eq!(machine.pending_state(), None);
    assert!(drain(&mut events).iter().any(|event| matches!(
        event,
        CombatEvent::CommandRejected {
            state: StateKind::PlayerSelected,
            ..
        }
    )));

    for command in [
        CombatCommand::Attack,
        CombatCommand::SelectTarget(Position::new(2, 1)),
        CombatCommand::Confirm,
    ] {
        handle.send(command).await.expect("send");
        machine.advance().await.expect("command");
    }
    assert_eq!(machine.pending_state(), Some(StateKind::PlayerPerformAction));

    machine.advance().await.expect("perform");
    assert_eq!(machine.pending_state(), Some(StateKind::TurnOver));
    assert_eq!(machine.encounter().field.unit(UnitId(2)).map(Unit::health), Some(8));
    assert_eq!(machine.encounter().log.damage_dealt_by(UnitId(1)), 4);
    assert!(drain(&mut events).iter().any(|event| matches!(
        event,
        CombatEvent::ActionResolved { actor: UnitId(1), .. }
    )));
}

#[tokio::test]
async fn defend_raises_defense_and_ends_the_turn() {
    let (mut machine, handle) = machine(duel(), Collaborators::default());
    machine.start().expect("start");
    machine.advance().await.expect("init turn");
    machine.advance().await.expect("player selected");

    handle.send(CombatCommand::Defend).await.expect("send");
    machine.advance().await.expect("defend");

    assert_eq!(machine.pending_state(), Some(StateKind::TurnOver));
    let defense = machine
        .encounter()
        .field
        .unit(UnitId(1))
        .map(|unit| unit.attributes.current(AttributeKind::Defense));
    assert_eq!(defense, Some(4));
    assert_eq!(machine.encounter().log.entries()[0].label, "Defend");
}

#[tokio::test]
async fn finished_machine_ignores_further_input() {
    let (mut machine, handle) = machine(duel(), Collaborators::default());
    let mut events = handle.subscribe();
    machine.start().expect("start");
    machine.advance().await.expect("init turn");
    machine.advance().await.expect("player selected");
    handle.send(CombatCommand::Abort).await.expect("send");
    machine.advance().await.expect("abort");
    machine.advance().await.expect("post combat");
    assert!(machine.is_finished());

    drain(&mut events);
    handle.send(CombatCommand::EndTurn).await.expect("send");
    machine.advance().await.expect("finished machines ignore input");
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn moving_keeps_a_self_only_item_on_the_user() {
    let potion = Item::new(ItemId(1), "Potion").with_effect(Effect::Restore {
        attribute: AttributeKind::Health,
        amount: 5,
    });
    let mut encounter = duel();
    if let Some(player) = encounter.field.unit_mut(UnitId(1)) {
        player.inventory.push(potion);
        player
            .attributes
            .get_mut(AttributeKind::Health)
            .expect("health")
            .deplete(8);
    }

    let (mut machine, handle) = machine(encounter, Collaborators::default());
    machine.start().expect("start");
    machine.advance().await.expect("init turn");
    machine.advance().await.expect("player selected");

    for command in [
        CombatCommand::SelectItem(ItemId(1)),
        CombatCommand::Move(Position::new(1, 2)),
        CombatCommand::Confirm,
    ] {
        handle.send(command).await.expect("send");
        machine.advance().await.expect("command");
    }
    assert_eq!(machine.pending_state(), Some(StateKind::PlayerPerformAction));
    machine.advance().await.expect("perform");

    let player = machine.encounter().field.unit(UnitId(1)).expect("player");
    assert_eq!(player.position, Position::new(1, 2));
    assert_eq!(player.health(), 9);
    assert!(player.item(ItemId(1)).is_none());
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Confirmation,
    ClearActionTargets,
    HeadToHead(bool),
    ClearHeadToHead,
    Cursor(bool),
    ClearSelectionIndicators,
    RemoveHighlights,
    Music { calm: bool },
    Perform(UnitId),
}

/// Records every collaborator call in order.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    fn push(&self, call: Call) {
        self.calls.lock().expect("calls").push(call);
    }

    fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().expect("calls"))
    }

    fn collaborators(&self) -> Collaborators {
        Collaborators::default()
            .with_presentation(Arc::new(self.clone()))
            .with_music(Arc::new(self.clone()))
            .with_performer(Arc::new(self.clone()))
    }
}

impl Presentation for Recorder {
    fn play_confirmation(&self) {
        self.push(Call::Confirmation);
    }

    fn clear_action_targets(&self) {
        self.push(Call::ClearActionTargets);
    }

    fn show_head_to_head(&self, visible: bool) {
        self.push(Call::HeadToHead(visible));
    }

    fn clear_head_to_head(&self) {
        self.push(Call::ClearHeadToHead);
    }

    fn show_cursor_and_tile_selector(&self, visible: bool) {
        self.push(Call::Cursor(visible));
    }

    fn clear_selection_indicators(&self) {
        self.push(Call::ClearSelectionIndicators);
    }

    fn remove_highlighted_tiles(&self) {
        self.push(Call::RemoveHighlights);
    }
}

impl MusicController for Recorder {
    fn transition_music(&self, calm: bool) {
        self.push(Call::Music { calm });
    }
}

#[async_trait]
impl ActionPerformer for Recorder {
    async fn perform(
        &self,
        action: &mut Action,
        actor: UnitId,
        field: &mut Battlefield,
    ) -> Result<Resolution> {
        self.push(Call::Perform(actor));
        ResolvingPerformer.perform(action, actor, field).await
    }
}

/// Player #1 at (0, 0) and enemy #2 at (9, 9), far beyond each other's reach.
fn standoff() -> Encounter {
    let mut field = Battlefield::new(10, 10);
    field.spawn(soldier(1, Faction::Player, 0, 0, 9)).expect("spawn player");
    field.spawn(soldier(2, Faction::Enemy, 9, 9, 1)).expect("spawn enemy");
    Encounter::new(field)
}

#[tokio::test]
async fn turn_over_cues_and_music_follow_actor_and_distance() {
    let cases = [
        (duel(), UnitId(1), vec![Call::Confirmation, Call::Music { calm: false }]),
        (duel(), UnitId(2), vec![Call::Music { calm: false }]),
        (standoff(), UnitId(1), vec![Call::Confirmation, Call::Music { calm: true }]),
        (standoff(), UnitId(2), vec![Call::Music { calm: true }]),
    ];

    for (mut encounter, actor, cues) in cases {
        encounter.highlighted_unit = Some(actor);
        let recorder = Recorder::default();
        let (mut machine, _handle) = machine(encounter, recorder.collaborators());
        machine.change_state::<TurnOver>().expect("queue turn over");
        machine.advance().await.expect("enter turn over");

        let mut expected = cues;
        expected.push(Call::RemoveHighlights);
        assert_eq!(recorder.take(), expected, "actor {actor}");
        assert_eq!(machine.pending_state(), Some(StateKind::InitTurn));
    }
}

#[tokio::test]
async fn player_perform_clears_the_ui_before_performing() {
    let recorder = Recorder::default();
    let mut encounter = duel();
    let mut action = Action::ability(Ability::basic_attack());
    resolution::select_target(&mut action, UnitId(1), &encounter.field, Position::new(2, 1))
        .expect("aim");
    encounter.action = Some(action);
    encounter.highlighted_unit = Some(UnitId(1));

    let (mut machine, _handle) = machine(encounter, recorder.collaborators());
    machine.change_state::<PlayerPerformAction>().expect("queue perform");
    machine.advance().await.expect("perform");

    assert_eq!(
        recorder.take(),
        vec![
            Call::Confirmation,
            Call::ClearActionTargets,
            Call::HeadToHead(false),
            Call::ClearHeadToHead,
            Call::Cursor(false),
            Call::ClearSelectionIndicators,
            Call::Perform(UnitId(1)),
        ]
    );
    assert_eq!(machine.pending_state(), Some(StateKind::TurnOver));
}

#[tokio::test]
async fn enemy_perform_skips_the_confirmation_cue() {
    let recorder = Recorder::default();
    let mut encounter = duel();
    let mut action = Action::ability(Ability::basic_attack());
    resolution::select_target(&mut action, UnitId(2), &encounter.field, Position::new(1, 1))
        .expect("aim");
    encounter.action = Some(action);
    encounter.highlighted_unit = Some(UnitId(2));

    let (mut machine, _handle) = machine(encounter, recorder.collaborators());
    machine.change_state::<EnemyPerformAction>().expect("queue perform");
    machine.advance().await.expect("perform");

    assert_eq!(
        recorder.take(),
        vec![
            Call::ClearActionTargets,
            Call::ClearHeadToHead,
            Call::ClearSelectionIndicators,
            Call::Perform(UnitId(2)),
        ]
    );
    assert_eq!(machine.encounter().field.unit(UnitId(1)).map(Unit::health), Some(8));
}
