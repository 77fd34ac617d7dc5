use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use marionette_core::{
    Animation, AssetRef, Curve, Entity, EventLine, KeyData, MainlineKey, Meta, Model, ObjectData,
    ObjectKind, ObjectRef, PlaybackEvent, Player, SampleError, Spatial, Timeline, TimelineKey,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn sprite_key(time: f32, x: f32) -> TimelineKey {
    TimelineKey {
        time,
        curve: Curve::Linear,
        spin: 1,
        data: KeyData::Object(ObjectData {
            spatial: Spatial::new(x, 0.0),
            asset: Some(AssetRef { folder: 0, file: 0 }),
            ..ObjectData::default()
        }),
    }
}

/// One sprite keyed x 0 -> 100 over [0, 1000].
fn mk_animation(name: &str, length: f32, looping: bool) -> Animation {
    Animation {
        name: name.to_string(),
        length,
        looping,
        mainline_keys: vec![
            MainlineKey {
                time: 0.0,
                curve: Curve::Linear,
                bone_refs: Vec::new(),
                object_refs: vec![ObjectRef {
                    parent: -1,
                    timeline: 0,
                    key: 0,
                    z_index: 0,
                }],
            },
            MainlineKey {
                time: length,
                curve: Curve::Linear,
                bone_refs: Vec::new(),
                object_refs: vec![ObjectRef {
                    parent: -1,
                    timeline: 0,
                    key: 1,
                    z_index: 0,
                }],
            },
        ],
        timelines: vec![Timeline {
            name: "body".into(),
            kind: ObjectKind::Sprite,
            obj: None,
            meta: Meta::default(),
            keys: vec![sprite_key(0.0, 0.0), sprite_key(length, 100.0)],
        }],
        eventlines: Vec::new(),
        soundlines: Vec::new(),
        meta: Meta::default(),
    }
}

fn mk_model(animations: Vec<Animation>) -> Arc<Model> {
    Arc::new(Model {
        entities: vec![Entity {
            name: "hero".into(),
            object_infos: Vec::new(),
            var_defs: Vec::new(),
            animations,
        }],
    })
}

/// it should sample the mid pose after update(500) and clamp + notify at the end
#[test]
fn scenario_box_animation() {
    let model = mk_model(vec![mk_animation("slide", 1000.0, false)]);
    let mut player = Player::new(model, 0).unwrap();

    let finished = Rc::new(RefCell::new(Vec::new()));
    {
        let finished = Rc::clone(&finished);
        player.on_event(Box::new(move |event| {
            if let PlaybackEvent::AnimationFinished { animation } = event {
                finished.borrow_mut().push(animation.clone());
            }
        }));
    }

    player.update(500.0).unwrap();
    approx(player.pose().visuals[0].spatial.x, 50.0, 1e-3);
    assert!(finished.borrow().is_empty());

    // stepping to 1500 clamps to the end and notifies once
    player.update(1000.0).unwrap();
    approx(player.pose().visuals[0].spatial.x, 100.0, 1e-3);
    assert_eq!(*finished.borrow(), vec!["slide".to_string()]);

    // parked at the clamp boundary: no further notification
    player.update(100.0).unwrap();
    assert_eq!(finished.borrow().len(), 1);
}

/// it should produce identical snapshots for repeated update(0)
#[test]
fn update_zero_is_idempotent() {
    let model = mk_model(vec![mk_animation("slide", 1000.0, false)]);
    let mut player = Player::new(model, 0).unwrap();
    player.update(250.0).unwrap();
    let pose_first = player.pose().clone();
    let meta_first = player.metadata().clone();

    player.update(0.0).unwrap();
    assert_eq!(player.pose(), &pose_first);
    assert_eq!(player.metadata(), &meta_first);

    player.update(0.0).unwrap();
    assert_eq!(player.pose(), &pose_first);
}

/// it should wrap elapsed time on looping clips
#[test]
fn looping_wraps_time() {
    let model = mk_model(vec![mk_animation("cycle", 1000.0, true)]);
    let mut player = Player::new(model, 0).unwrap();
    player.update(1200.0).unwrap();
    approx(player.time(), 200.0, 1e-3);
}

/// it should wrap backwards for negative playback speed
#[test]
fn negative_speed_wraps_backward() {
    let model = mk_model(vec![mk_animation("cycle", 1000.0, true)]);
    let mut player = Player::new(model, 0).unwrap();
    player.set_speed(-1.0);
    player.update(300.0).unwrap();
    approx(player.time(), 700.0, 1e-3);
}

/// it should reject unknown animation names at the call boundary
#[test]
fn unknown_animation_is_an_error() {
    let model = mk_model(vec![mk_animation("idle", 1000.0, true)]);
    let mut player = Player::new(model, 0).unwrap();
    let err = player.play("sprint").unwrap_err();
    assert!(matches!(err, SampleError::AnimationNotFound { .. }));
    assert_eq!(err.category(), "playback");
    assert!(player.transition("sprint", 200.0).is_err());
}

/// it should cross-fade and adopt the target once the factor reaches one
#[test]
fn transition_adopts_target() {
    let model = mk_model(vec![
        mk_animation("idle", 1000.0, true),
        mk_animation("run", 1000.0, true),
    ]);
    let mut player = Player::new(model, 0).unwrap();

    let changes = Rc::new(RefCell::new(Vec::new()));
    {
        let changes = Rc::clone(&changes);
        player.on_event(Box::new(move |event| {
            if let PlaybackEvent::AnimationChanged { from, to } = event {
                changes.borrow_mut().push((from.clone(), to.clone()));
            }
        }));
    }

    player.transition("run", 500.0).unwrap();
    assert_eq!(player.next_animation(), Some("run"));

    player.update(250.0).unwrap();
    assert_eq!(player.current_animation(), "idle");

    // enough further updates to exhaust the fade
    for _ in 0..4 {
        player.update(250.0).unwrap();
    }
    assert_eq!(player.current_animation(), "run");
    assert_eq!(player.next_animation(), None);
    assert_eq!(
        *changes.borrow(),
        vec![("idle".to_string(), "run".to_string())]
    );
}

/// it should keep a static blend factor pinned across updates
#[test]
fn static_blend_stays_pinned() {
    let mut near = mk_animation("near", 1000.0, true);
    near.timelines[0].keys = vec![sprite_key(0.0, 0.0), sprite_key(1000.0, 0.0)];
    let mut far = mk_animation("far", 1000.0, true);
    far.timelines[0].keys = vec![sprite_key(0.0, 100.0), sprite_key(1000.0, 100.0)];
    let model = mk_model(vec![near, far]);

    let mut player = Player::new(model, 0).unwrap();
    player.blend("near", "far", 0.25).unwrap();
    player.update(100.0).unwrap();
    approx(player.pose().visuals[0].spatial.x, 25.0, 1e-3);

    // the factor never evolves on its own
    player.update(400.0).unwrap();
    approx(player.pose().visuals[0].spatial.x, 25.0, 1e-3);
    assert_eq!(player.next_animation(), Some("far"));
}

/// it should deliver event-line triggers through registered listeners
#[test]
fn event_lines_reach_listeners() {
    let mut animation = mk_animation("walk", 1000.0, false);
    animation.eventlines.push(EventLine {
        name: "footstep".into(),
        keys: vec![500.0],
    });
    let model = mk_model(vec![animation]);
    let mut player = Player::new(model, 0).unwrap();

    let heard = Rc::new(RefCell::new(Vec::new()));
    {
        let heard = Rc::clone(&heard);
        player.on_event(Box::new(move |event| {
            if let PlaybackEvent::EventTriggered { name } = event {
                heard.borrow_mut().push(name.clone());
            }
        }));
    }

    player.update(400.0).unwrap();
    assert!(heard.borrow().is_empty());
    player.update(200.0).unwrap();
    assert_eq!(*heard.borrow(), vec!["footstep".to_string()]);
    player.update(100.0).unwrap();
    assert_eq!(heard.borrow().len(), 1);
    assert_eq!(player.metadata().events.len(), 0);
}

/// it should fire events traversed backward under negative speed
#[test]
fn negative_speed_fires_traversed_events() {
    let mut animation = mk_animation("walk", 1000.0, false);
    animation.eventlines.push(EventLine {
        name: "plant".into(),
        keys: vec![450.0],
    });
    let model = mk_model(vec![animation]);
    let mut player = Player::new(model, 0).unwrap();
    player.set_time(600.0);
    player.set_speed(-1.0);

    player.update(300.0).unwrap();
    assert_eq!(player.metadata().events, vec!["plant".to_string()]);

    // stepping further back does not re-fire it
    player.update(100.0).unwrap();
    assert!(player.metadata().events.is_empty());
}

/// it should keep the previous snapshots when an update fails midway
#[test]
fn failed_update_preserves_published_snapshots() {
    let mut broken = mk_animation("broken", 1000.0, false);
    broken.mainline_keys[0].object_refs[0].timeline = 9;
    broken.mainline_keys[1].object_refs[0].timeline = 9;
    let model = mk_model(vec![mk_animation("ok", 1000.0, false), broken]);

    let mut player = Player::new(model, 0).unwrap();
    player.update(500.0).unwrap();
    let pose_before = player.pose().clone();

    player.play("broken").unwrap();
    let err = player.update(100.0).unwrap_err();
    assert_eq!(err.category(), "data");
    assert_eq!(player.pose(), &pose_before);
}

/// it should apply the instance transform uniformly to the whole pose
#[test]
fn instance_transform_moves_the_pose() {
    let model = mk_model(vec![mk_animation("slide", 1000.0, false)]);
    let mut player = Player::new(model, 0).unwrap();
    player.set_position(500.0, -20.0);
    player.set_scale(2.0, 2.0);
    player.update(500.0).unwrap();
    // local x=50 scaled by 2 then translated
    approx(player.pose().visuals[0].spatial.x, 600.0, 1e-3);
    approx(player.pose().visuals[0].spatial.y, -20.0, 1e-3);
    approx(player.pose().visuals[0].spatial.scale_x, 2.0, 1e-6);
}

/// it should expose and accept normalized progress
#[test]
fn progress_get_set() {
    let model = mk_model(vec![mk_animation("slide", 1000.0, false)]);
    let mut player = Player::new(model, 0).unwrap();
    player.set_progress(0.75);
    approx(player.time(), 750.0, 1e-3);
    approx(player.progress(), 0.75, 1e-5);
    player.set_time(2000.0);
    approx(player.time(), 1000.0, 1e-3);
}
