use image::{Rgb, RgbImage};
use nalgebra::Matrix3;
use pitchcal::{
    DetectionRecord, DetectionRecordBuilder, ExtractorConfig, Homography, InMemoryFrames,
    LandmarkClass, LandmarkExtractor, LandmarkLine, PitchLayout, Team, TeamAssignments,
    TeamClassifier, TeamClassifierConfig, TranslationPipeline, Translator, TranslatorConfig,
};

/// Pitch-to-image mapping of a camera behind the near end zone.
fn camera() -> Homography {
    Homography::from_matrix(Matrix3::new(
        0.012, -0.002, 0.278, //
        0.0, 0.003, 0.2, //
        0.0, -0.004, 1.0,
    ))
}

fn landmarks(frame: u32, lines: &[LandmarkLine]) -> Vec<DetectionRecord> {
    let layout = PitchLayout::ultimate();
    let camera = camera();
    lines
        .iter()
        .flat_map(|line| line.classes())
        .map(|class| {
            let [x, y] = camera.project(layout.real_coords(class));
            DetectionRecordBuilder::new()
                .frame(frame)
                .class(class.class_id(), "keypoint")
                .xywh(x, y, 0.01, 0.01)
                .confidence(0.9)
                .build()
        })
        .collect()
}

fn player_at(frame: u32, track_id: u32, pitch: [f64; 2]) -> DetectionRecord {
    let [x, y] = camera().project(pitch);
    DetectionRecordBuilder::new()
        .frame(frame)
        .class(0, "person")
        .xywh(x, y, 0.04, 0.1)
        .confidence(0.85)
        .track_id(track_id)
        .build()
}

fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
    assert!(
        (actual[0] - expected[0]).abs() < 1e-6 && (actual[1] - expected[1]).abs() < 1e-6,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_player_projects_onto_known_pitch_position() {
    let mut records = landmarks(0, &[LandmarkLine::NearCorners, LandmarkLine::FarEndZone]);
    records.push(player_at(0, 7, [20.0, 90.0]));

    let translation = Translator::default().translate(&records, 1, &TeamAssignments::new());
    let player = translation.records.last().unwrap();
    assert_close(player.pitch.unwrap(), [20.0, 90.0]);

    // Landmarks themselves land on their reference positions
    let layout = PitchLayout::ultimate();
    for row in &translation.records[..4] {
        let class = LandmarkClass::from_class_id(row.class_id).unwrap();
        assert_close(row.pitch.unwrap(), layout.real_coords(class));
    }
    assert_eq!(translation.coverage.direct, 1);
}

#[test]
fn test_best_quad_prefers_lines_near_the_camera() {
    let records = landmarks(
        0,
        &[
            LandmarkLine::FarCorners,
            LandmarkLine::FarEndZone,
            LandmarkLine::NearEndZone,
        ],
    );
    let extractor = LandmarkExtractor::with_default_config(&records);
    let quad = extractor.best_quad(0).unwrap().unwrap();
    assert_eq!(quad.line_keys, [LandmarkLine::NearEndZone, LandmarkLine::FarEndZone]);
    assert_eq!(quad.class_ids(), [39, 40, 34, 35]);
}

#[test]
fn test_dedup_keeps_one_landmark_per_frame_and_class() {
    let mut records = landmarks(0, &[LandmarkLine::NearCorners, LandmarkLine::FarCorners]);
    let mut duplicate = records[0].clone();
    duplicate.y -= 0.05;
    duplicate.x += 0.01;
    records.push(duplicate.clone());
    let mut lower = records[1].clone();
    lower.y += 0.05;
    records.push(lower);

    let extractor = LandmarkExtractor::with_default_config(&records);
    let kept = extractor.landmarks(0);
    assert_eq!(kept.len(), 4);
    let near_left = kept
        .iter()
        .find(|l| l.class == LandmarkClass::NearLeftCorner)
        .unwrap();
    assert_eq!(near_left.point, [duplicate.x, duplicate.y]);
    let near_right = kept
        .iter()
        .find(|l| l.class == LandmarkClass::NearRightCorner)
        .unwrap();
    assert_eq!(near_right.point, [records[1].x, records[1].y]);
    assert!(extractor.best_quad(0).unwrap().is_some());
}

#[test]
fn test_uncalibrated_frame_only_loses_its_own_coordinates() {
    let mut records = landmarks(0, &[LandmarkLine::NearCorners, LandmarkLine::NearEndZone]);
    records.push(player_at(0, 1, [10.0, 95.0]));
    // Frame 1: a lone landmark and two players
    records.extend(landmarks(1, &[LandmarkLine::FarCorners]).into_iter().take(1));
    records.push(player_at(1, 1, [11.0, 94.0]));
    records.push(player_at(1, 2, [30.0, 60.0]));
    records.extend(landmarks(2, &[LandmarkLine::FarCorners, LandmarkLine::NearCorners]));
    records.push(player_at(2, 1, [12.0, 93.0]));

    let config = TranslatorConfig {
        extractor: ExtractorConfig {
            max_lookback: 1,
            ..ExtractorConfig::default()
        },
        ..TranslatorConfig::default()
    };
    let translator = Translator::new(config, PitchLayout::ultimate());
    let translation = translator.translate(&records, 3, &TeamAssignments::new());

    for row in &translation.records {
        match row.frame {
            1 => assert!(row.pitch.is_none(), "frame 1 row has coordinates: {row:?}"),
            _ => assert!(row.pitch.is_some(), "frame {} row lost coordinates", row.frame),
        }
    }
    let frame2_player = translation
        .records
        .iter()
        .find(|r| r.frame == 2 && r.track_id == Some(1))
        .unwrap();
    assert_close(frame2_player.pitch.unwrap(), [12.0, 93.0]);
    assert_eq!(translation.coverage.unavailable, 1);
    assert_eq!(translation.coverage.calibrated(), 2);
}

#[test]
fn test_look_back_reuses_earlier_calibration() {
    let mut records = landmarks(3, &[LandmarkLine::NearCorners, LandmarkLine::FarEndZone]);
    records.push(player_at(5, 4, [18.5, 50.0]));

    let extractor = LandmarkExtractor::with_default_config(&records);
    assert_eq!(
        extractor.best_quad(5).unwrap(),
        extractor.select(3).unwrap()
    );

    let translation = Translator::default().translate(&records, 6, &TeamAssignments::new());
    let player = translation.records.last().unwrap();
    assert_close(player.pitch.unwrap(), [18.5, 50.0]);
    assert_eq!(translation.coverage.look_back, 2);
    assert_eq!(translation.coverage.unavailable, 3);
}

#[test]
fn test_pipeline_labels_and_projects_players() {
    let width = 200;
    let height = 100;
    let mut frame = RgbImage::from_pixel(width, height, Rgb([30, 140, 30]));
    let jerseys = [Rgb([230, 230, 230]), Rgb([20, 20, 160])];
    let positions = [[5.0, 85.0], [30.0, 85.0], [12.0, 70.0], [25.0, 70.0]];

    let mut records = landmarks(0, &[LandmarkLine::NearCorners, LandmarkLine::NearEndZone]);
    for (i, pitch) in positions.iter().enumerate() {
        let record = player_at(0, i as u32 + 1, *pitch);
        let color = jerseys[i % 2];
        let cx = (record.x * width as f64) as i64;
        let cy = (record.y * height as f64) as i64;
        for x in cx - 6..=cx + 6 {
            for y in cy - 8..=cy + 8 {
                if (0..width as i64).contains(&x) && (0..height as i64).contains(&y) {
                    frame.put_pixel(x as u32, y as u32, color);
                }
            }
        }
        records.push(record);
    }

    let classifier = TeamClassifier::new(TeamClassifierConfig {
        crop_width: 8,
        crop_height: 16,
        torso: None,
        ..TeamClassifierConfig::default()
    });
    let mut pipeline = TranslationPipeline::new(
        InMemoryFrames::new(vec![frame]),
        Translator::default(),
        classifier,
    );
    let translation = pipeline.run(&records, 1).unwrap();

    let players: Vec<_> = translation
        .records
        .iter()
        .filter(|r| r.class_name == "person")
        .collect();
    assert_eq!(players.len(), 4);
    assert_eq!(players[0].team, Some(Team::First));
    assert_eq!(players[1].team, Some(Team::Second));
    assert_eq!(players[2].team, Some(Team::First));
    assert_eq!(players[3].team, Some(Team::Second));
    for (player, expected) in players.iter().zip(positions) {
        assert_close(player.pitch.unwrap(), expected);
    }
}

#[test]
fn test_translation_serializes_missing_values_as_null() {
    let records = vec![player_at(0, 3, [10.0, 10.0])];
    let translation = Translator::default().translate(&records, 1, &TeamAssignments::new());
    let json = serde_json::to_value(&translation).unwrap();
    assert!(json["records"][0]["pitch"].is_null());
    assert!(json["records"][0]["team"].is_null());
    assert_eq!(json["coverage"]["unavailable"], 1);
}
