use bonekey_animation_core::{
    parse_scene_json, ClipLibrary, Config, Engine, JsonSource, LoadError, SourceChannel,
    SourceScene, SourceTrack,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn parses_walk_fixture_with_mixed_key_shapes() {
    let json = bonekey_test_fixtures::scenes::json("walk").expect("load walk fixture");
    let scene: SourceScene = parse_scene_json(&json).expect("parse walk scene");

    assert_eq!(scene.tracks.len(), 1);
    let track = &scene.tracks[0];
    assert_eq!(track.name.as_deref(), Some("walk"));
    approx(track.duration, 4.0, 1e-6);

    let spine = track
        .channels
        .iter()
        .find(|c| c.node_name == "spine")
        .expect("spine channel");
    // Object-shaped key in the middle of array-shaped keys
    assert_eq!(spine.position_keys[1], [1.0, 2.0, 3.0]);
    assert_eq!(spine.position_keys.len(), 3);
    assert_eq!(spine.rotation_keys.len(), 2);
    approx(spine.rotation_keys[1][3], 0.7071068, 1e-6);

    let description = bonekey_test_fixtures::scenes::description("walk").unwrap();
    assert!(description.is_some());
}

#[test]
fn walk_fixture_end_to_end() {
    let json = bonekey_test_fixtures::scenes::json("walk").expect("load walk fixture");
    let mut eng = Engine::new(Config::default());
    eng.load("walk", &JsonSource(&json)).expect("load walk clip");

    let h = eng.play("walk").unwrap();
    assert_eq!(h.index(), 0);
    eng.update(2.0);

    let spine = eng.sample_channel(h, "spine").unwrap();
    assert_eq!(spine.position, [1.0, 2.0, 3.0]);
    let hips = eng.sample_channel(h, "hips").unwrap();
    assert_eq!(hips.position, [0.0, 1.0, 0.0]);
    assert_eq!(hips.rotation, [0.0, 0.0, 0.0, 1.0]);

    eng.stop(h).unwrap();
    assert!(eng.sample_channel(h, "spine").is_err());
}

#[test]
fn only_first_track_is_loaded() {
    let json = bonekey_test_fixtures::scenes::json("multi-track").unwrap();
    let mut lib = ClipLibrary::new();
    lib.load("idle", &JsonSource(&json)).unwrap();

    let clip = lib.get("idle").unwrap();
    approx(clip.duration(), 2.0, 1e-6);
    assert_eq!(clip.channels().len(), 1);
    assert!(clip.channel("head").is_none());
    assert_eq!(clip.channel("root").unwrap().positions.len(), 2);
}

#[test]
fn duplicate_channels_last_one_wins() {
    let json = bonekey_test_fixtures::scenes::json("duplicate-channels").unwrap();
    let mut eng = Engine::default();
    eng.load("dup", &JsonSource(&json)).unwrap();

    let clip = eng.clip("dup").unwrap();
    assert_eq!(clip.duplicate_node_names(), vec!["arm"]);

    let h = eng.play("dup").unwrap();
    let s = eng.sample_channel(h, "arm").unwrap();
    assert_eq!(s.position, [2.0, 0.0, 0.0]);
    assert_eq!(eng.sample_pose(h).unwrap().len(), 1);
}

#[test]
fn empty_scene_has_no_animation_data() {
    let json = bonekey_test_fixtures::scenes::json("empty").unwrap();
    let mut lib = ClipLibrary::new();
    assert_eq!(
        lib.load("empty", &JsonSource(&json)),
        Err(LoadError::NoAnimationData)
    );
    assert!(lib.is_empty());
}

#[test]
fn every_fixture_parses() {
    for key in bonekey_test_fixtures::scenes::keys() {
        let json = bonekey_test_fixtures::scenes::json(&key).unwrap();
        parse_scene_json(&json).unwrap_or_else(|e| panic!("fixture {key}: {e}"));
    }
}

#[test]
fn typed_fixture_load_matches_json_source() {
    let typed: SourceScene = bonekey_test_fixtures::scenes::load("walk").expect("typed walk");
    let json = bonekey_test_fixtures::scenes::json("walk").unwrap();
    assert_eq!(typed, parse_scene_json(&json).unwrap());

    let path = bonekey_test_fixtures::scenes::path("walk").unwrap();
    assert!(path.ends_with("scenes/walk.json"));
    assert!(path.is_file());
}

#[test]
fn serialized_scene_loads_back_through_json_source() {
    let scene = SourceScene {
        tracks: vec![SourceTrack {
            name: None,
            duration: 2.0,
            channels: vec![SourceChannel {
                node_name: "root".into(),
                position_keys: vec![[0.0, 0.0, 0.0], [4.0, 0.0, 0.0]],
                rotation_keys: vec![[0.0, 0.0, 0.0, 1.0]],
            }],
        }],
    };
    let text = serde_json::to_string(&scene).expect("serialize scene");

    let mut lib = ClipLibrary::new();
    lib.load("a", &JsonSource(&text)).expect("load serialized scene");
    let clip = lib.get("a").unwrap();
    approx(clip.duration(), 2.0, 1e-6);
    assert_eq!(
        clip.channel("root").unwrap().positions,
        scene.tracks[0].channels[0].position_keys
    );
}
