use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marionette_core::{
    Animation, AssetRef, BoneRef, Config, Curve, Entity, KeyData, MainlineKey, Meta, Model,
    ObjectData, ObjectKind, ObjectRef, PoseSnapshot, Spatial, Timeline, TimelineKey,
};

fn bone_key(time: f32, angle: f32) -> TimelineKey {
    TimelineKey {
        time,
        curve: Curve::Linear,
        spin: 1,
        data: KeyData::Bone(Spatial {
            x: 10.0,
            angle,
            ..Spatial::default()
        }),
    }
}

fn sprite_key(time: f32, x: f32) -> TimelineKey {
    TimelineKey {
        time,
        curve: Curve::Bezier {
            x1: 0.25,
            y1: 0.1,
            x2: 0.25,
            y2: 1.0,
        },
        spin: 1,
        data: KeyData::Object(ObjectData {
            spatial: Spatial::new(x, 0.0),
            asset: Some(AssetRef { folder: 0, file: 0 }),
            ..ObjectData::default()
        }),
    }
}

/// A chain of 8 bones, each carrying one sprite, keyed over [0, 1000].
fn mk_model() -> Model {
    const BONES: usize = 8;
    let mut timelines = Vec::new();
    let mut bone_refs = Vec::new();
    let mut object_refs = Vec::new();
    for i in 0..BONES {
        timelines.push(Timeline {
            name: format!("bone{i}"),
            kind: ObjectKind::Bone,
            obj: None,
            meta: Meta::default(),
            keys: vec![bone_key(0.0, 0.0), bone_key(1000.0, 45.0)],
        });
        bone_refs.push(BoneRef {
            parent: i as i32 - 1,
            timeline: i as u32,
            key: 0,
        });
    }
    for i in 0..BONES {
        timelines.push(Timeline {
            name: format!("sprite{i}"),
            kind: ObjectKind::Sprite,
            obj: None,
            meta: Meta::default(),
            keys: vec![sprite_key(0.0, 0.0), sprite_key(1000.0, 50.0)],
        });
        object_refs.push(ObjectRef {
            parent: i as i32,
            timeline: (BONES + i) as u32,
            key: 0,
            z_index: i as u32,
        });
    }

    let mut end_key = MainlineKey {
        time: 1000.0,
        curve: Curve::Linear,
        bone_refs: bone_refs.clone(),
        object_refs: object_refs.clone(),
    };
    for r in end_key.bone_refs.iter_mut() {
        r.key = 1;
    }
    for r in end_key.object_refs.iter_mut() {
        r.key = 1;
    }

    let animation = Animation {
        name: "bench".into(),
        length: 1000.0,
        looping: true,
        mainline_keys: vec![
            MainlineKey {
                time: 0.0,
                curve: Curve::Linear,
                bone_refs,
                object_refs,
            },
            end_key,
        ],
        timelines,
        eventlines: Vec::new(),
        soundlines: Vec::new(),
        meta: Meta::default(),
    };

    Model {
        entities: vec![Entity {
            name: "bench".into(),
            object_infos: Vec::new(),
            var_defs: Vec::new(),
            animations: vec![animation],
        }],
    }
}

fn bench_sample_pose(c: &mut Criterion) {
    let model = mk_model();
    let entity = &model.entities[0];
    let animation = &entity.animations[0];
    let cfg = Config::default();
    let mut out = PoseSnapshot::with_capacity(&cfg);

    c.bench_function("sample_pose_8_bones", |b| {
        b.iter(|| {
            out.clear();
            marionette_core::sample_pose(
                &model,
                entity,
                animation,
                black_box(333.0),
                None,
                &mut out,
                &cfg,
            )
            .unwrap();
            black_box(&out);
        })
    });
}

criterion_group!(benches, bench_sample_pose);
criterion_main!(benches);
