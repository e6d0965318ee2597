use indoc::indoc;

use crate::{
    AspOffset, Aspirate, AspirateTime, Density, Inlet, LoopSpan, ModelError, Orientation,
    PlateCard, PlateFormat, ProbeHeight, Program, ProgramFile, Soak, SoakTime, Step, Velocity,
    Volume,
};

fn plate() -> PlateCard {
    PlateCard::new("Greiner 1536", PlateFormat::new(Density::W1536, Orientation::Rows))
}

fn soak(seconds: u16) -> Soak {
    Soak {
        time: SoakTime(seconds),
    }
}

fn program_with_soaks(n: u16) -> Program {
    let mut program = Program::new("Wash", plate());
    for i in 1..=n {
        program.push(soak(i));
    }
    program
}

#[test]
fn positions_follow_order() {
    let mut program = Program::new("Wash", plate());
    let a = program.push(soak(1));
    let c = program.push(soak(3));
    let b = program.insert(2, soak(2)).unwrap();

    assert_eq!(program.position(a), Some(1));
    assert_eq!(program.position(b), Some(2));
    assert_eq!(program.position(c), Some(3));
    assert_eq!(program.id_at(3), Some(c));
    assert_eq!(program.id_at(0), None);
    assert_eq!(program.insert(5, soak(9)), Err(ModelError::StepPosition(5)));
}

#[test]
fn loops_follow_their_steps_through_inserts() {
    let mut program = program_with_soaks(4);
    program.add_loop_at(2, 3, 5).unwrap();
    assert_eq!(program.loop_spans(), vec![LoopSpan::new(2, 3, 5)]);

    program.insert(1, soak(10)).unwrap();
    assert_eq!(program.loop_spans(), vec![LoopSpan::new(3, 4, 5)]);
}

#[test]
fn removing_a_loop_endpoint_drops_the_loop() {
    let mut program = program_with_soaks(4);
    program.add_loop_at(1, 2, 2).unwrap();
    program.add_loop_at(3, 4, 2).unwrap();

    let first = program.id_at(1).unwrap();
    assert_eq!(program.remove(first), Some(Step::Soak(soak(1))));
    assert_eq!(program.remove(first), None);
    assert_eq!(program.len(), 3);
    assert_eq!(program.loop_spans(), vec![LoopSpan::new(2, 3, 2)]);
}

#[test]
fn removing_an_inner_step_keeps_the_loop() {
    let mut program = program_with_soaks(5);
    program.add_loop_at(1, 4, 3).unwrap();
    let inner = program.id_at(2).unwrap();
    program.remove(inner);
    assert_eq!(program.loop_spans(), vec![LoopSpan::new(1, 3, 3)]);
}

#[test]
fn loop_validation() {
    let mut program = program_with_soaks(6);
    assert_eq!(program.add_loop_at(1, 2, 0), Err(ModelError::RepeatCount(0)));
    assert_eq!(program.add_loop_at(1, 2, 11), Err(ModelError::RepeatCount(11)));
    assert_eq!(
        program.add_loop_at(4, 2, 1),
        Err(ModelError::LoopOrder { to: 4, from: 2 })
    );
    assert_eq!(program.add_loop_at(1, 7, 1), Err(ModelError::StepPosition(7)));

    program.add_loop_at(2, 4, 10).unwrap();
    assert_eq!(
        program.add_loop_at(4, 5, 1),
        Err(ModelError::LoopOverlap { to: 4, from: 5 })
    );
    assert_eq!(
        program.add_loop_at(1, 6, 1),
        Err(ModelError::LoopOverlap { to: 1, from: 6 })
    );
    assert_eq!(
        program.add_loop_at(3, 3, 1),
        Err(ModelError::LoopOverlap { to: 3, from: 3 })
    );
    program.add_loop_at(5, 6, 1).unwrap();
    program.add_loop_at(1, 1, 1).unwrap();

    let spans = program.loop_spans();
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0], LoopSpan::new(1, 1, 1));
    assert_eq!(spans[0].body_len(), 1);
    assert_eq!(spans[1].body_len(), 3);
}

#[test]
fn equality_ignores_step_ids() {
    let mut a = program_with_soaks(2);
    let removed = a.push(soak(99));
    a.remove(removed);
    a.add_loop_at(1, 2, 4).unwrap();

    let mut b = program_with_soaks(2);
    b.add_loop_at(1, 2, 4).unwrap();

    assert_eq!(a, b);
    b.push(soak(3));
    assert_ne!(a, b);
}

#[test]
fn program_file_json() {
    let json = indoc! {r#"
        {
          "name": "DEMO",
          "created": "2024-01-31",
          "programs": [
            {
              "name": "Wash",
              "plate": {
                "name": "Greiner 1536",
                "format": 3,
                "height": 10.4,
                "depth": 5.0,
                "row_offset": 1.25,
                "column_offset": 0.0,
                "row_spacing": 2.25,
                "column_spacing": 0.0,
                "max_volume": 12.0,
                "asp_offset": 0.0,
                "selection": "ABCD"
              },
              "steps": [
                { "kind": "aspirate", "velocity": "low", "time": 2.0, "height": 1.0, "asp_offset": -1.0 },
                { "kind": "dispense", "inlet": 1, "volume": 5.0 },
                { "kind": "soak", "time": 30 }
              ],
              "loops": [ { "from": 2, "to": 1, "repeats": 3 } ]
            }
          ]
        }
    "#};

    let file = ProgramFile::from_json(json).unwrap();
    assert_eq!(file.created.unwrap().to_string(), "2024-01-31");
    let program = &file.programs[0];
    assert_eq!(program.len(), 3);
    assert_eq!(program.loop_spans(), vec![LoopSpan::new(1, 2, 3)]);

    let steps: Vec<&Step> = program.steps().map(|(_, s)| s).collect();
    assert_eq!(
        steps[0],
        &Step::Aspirate(Aspirate {
            velocity: Velocity::Low,
            sweep: false,
            time: AspirateTime(20),
            height: ProbeHeight(10),
            asp_offset: AspOffset(-10),
        })
    );
    match steps[1] {
        Step::Dispense(d) => {
            assert_eq!(d.inlet, Inlet::new(1).unwrap());
            assert_eq!(d.volume, Volume(50));
            assert_eq!(d.liquid_factor.raw(), 100);
            assert_eq!(d.pressure.raw(), 550);
        }
        other => panic!("expected dispense, got {other:?}"),
    }

    let back = ProgramFile::from_json(&file.to_json().unwrap()).unwrap();
    assert_eq!(back, file);
}

#[test]
fn program_json_rejects_bad_loops() {
    let json = r#"{
        "name": "P",
        "plate": {
            "name": "X", "format": 1, "height": 0, "depth": 0, "row_offset": 0,
            "column_offset": 0, "row_spacing": 0, "column_spacing": 0,
            "max_volume": 0, "asp_offset": 0, "selection": ""
        },
        "steps": [ { "kind": "soak", "time": 1 } ],
        "loops": [ { "from": 1, "to": 1, "repeats": 12 } ]
    }"#;
    let err = serde_json::from_str::<Program>(json).unwrap_err();
    assert!(err.to_string().contains("repeat count 12"));
}

#[test]
fn inlet_range() {
    assert!(Inlet::new(0).is_none());
    assert!(Inlet::new(5).is_none());
    assert_eq!(Inlet::new(4).unwrap().index(), 3);
    assert_eq!(Inlet::all().count(), 4);
    assert!(serde_json::from_str::<Inlet>("5").is_err());
}
