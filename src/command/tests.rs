// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

use super::*;
use crate::grammar::expand;
use std::time::Duration;

const PLANT: &str = r###"
# a small bush
axiom("F")
rule("F", "F[+F]F[-F]F")   # bracketed branches
angle(25)
iterations(3)
"###;

fn plant_definition() -> LSystemDefinition {
    LSystemDefinition::new("F", Rules::new().with_rule('F', "F[+F]F[-F]F"), 25.0, 3)
}

fn plant_config(command: &str) -> ConfigType {
    let mut config = ConfigType::default();
    let _ = config.insert(COMMAND_TAG.to_string(), command.to_string());
    let _ = config.insert(TURTLE_SCRIPT_TAG.to_string(), PLANT.to_string());
    config
}

#[test]
fn test_trim_lsystem_string() {
    assert_eq!(
        trim_lsystem_string("  # only a comment\n\n axiom(\"F\") # trailing\n\t\nangle(90)"),
        "axiom(\"F\")\nangle(90)\n"
    );
}

#[test]
fn test_parse_definition() -> Result<(), LSystemError> {
    let definition = parse_definition(&trim_lsystem_string(PLANT))?;
    assert_eq!(definition, plant_definition());
    assert_eq!(definition.limits, ExpansionLimits::unlimited());
    Ok(())
}

#[test]
fn test_parse_definition_options() -> Result<(), LSystemError> {
    let definition = parse_definition(
        r###"
axiom("F X")
rule("X", "F - [ [ X ] + X ]")
rule("F", "FF")
angle(22.5)
timeout(0.5)
max_symbols(100000)
"###,
    )?;
    assert_eq!(definition.axiom, "FX");
    assert_eq!(definition.rules.len(), 2);
    assert_eq!(
        definition.rules.production('X'),
        crate::grammar::Production::Rewrite("F-[[X]+X]")
    );
    assert_eq!(definition.angle, 22.5);
    assert_eq!(definition.iterations, 0);
    assert_eq!(definition.limits.timeout, Some(Duration::from_millis(500)));
    assert_eq!(definition.limits.max_symbols, Some(100000));
    Ok(())
}

#[test]
fn test_parse_definition_errors() {
    let missing_axiom = parse_definition("angle(90)\n");
    assert!(
        matches!(missing_axiom, Err(LSystemError::MissingParameter(_))),
        "{missing_axiom:?}"
    );
    let missing_angle = parse_definition("axiom(\"F\")\n");
    assert!(
        matches!(missing_angle, Err(LSystemError::MissingParameter(_))),
        "{missing_angle:?}"
    );

    for bad in [
        // unknown statement
        "axiom(\"F\")\nangle(90)\nfoo(1)\n",
        // two axioms
        "axiom(\"F\")\naxiom(\"G\")\nangle(90)\n",
        // the same rule twice
        "axiom(\"F\")\nrule(\"F\", \"FF\")\nrule(\"F\", \"F+F\")\nangle(90)\n",
        // an empty rule
        "axiom(\"F\")\nrule(\"F\", \"\")\nangle(90)\n",
        // the rule id must be a single symbol
        "axiom(\"F\")\nrule(\"FF\", \"F\")\nangle(90)\n",
        // statement split over two lines
        "axiom(\n\"F\")\nangle(90)\n",
        // statement never completed
        "axiom(\"F\")\nangle(",
        "axiom(\"F\")\nangle(90)\niterations(-1)\n",
        "axiom(\"F\")\nangle(90)\niterations(2.5)\n",
        "axiom(\"F\")\nangle(90)\ntimeout(-3)\n",
        // more seconds than a Duration can hold
        "axiom(\"F\")\nangle(90)\ntimeout(100000000000000000000)\n",
        "axiom(\"F\")\nangle(90)\nmax_symbols(100000000000000000000)\n",
        // a number where text is expected
        "axiom(5)\nangle(90)\n",
    ] {
        let result = parse_definition(bad);
        assert!(
            matches!(result, Err(LSystemError::ParseError(_))),
            "{bad:?} gave {result:?}"
        );
    }

    // an angle that overflows to infinity
    let huge_angle = format!("axiom(\"F\")\nangle({})\n", "9".repeat(400));
    let result = parse_definition(&huge_angle);
    assert!(
        matches!(result, Err(LSystemError::ParseError(_))),
        "{result:?}"
    );
}

#[test]
fn test_growth_2d() -> Result<(), LSystemError> {
    let definition = plant_definition();
    let frames = growth_2d(&definition, "plant")?;
    assert_eq!(frames.len(), 4);
    for (n, frame) in frames.iter().enumerate() {
        assert_eq!(frame.iteration as usize, n);
        assert_eq!(frame.file_stem, format!("plant_iteration_{n}"));
        assert_eq!(frame.segments.len(), 5_usize.pow(n as u32));
    }
    assert_eq!(frames[0].symbol_count, 1);
    assert_eq!(frames[1].symbol_count, 11);
    assert_eq!(
        frames[3].segments,
        interpret_2d(&expand("F", &definition.rules, 3), 25.0)?
    );
    Ok(())
}

#[test]
fn test_growth_2d_zero_iterations() -> Result<(), LSystemError> {
    let definition = LSystemDefinition::new("F+F", Rules::new(), 90.0, 0);
    let frames = growth_2d(&definition, "id")?;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].file_stem, "id_iteration_0");
    assert_eq!(frames[0].segments.len(), 2);
    Ok(())
}

#[test]
fn test_growth_2d_underflow_reports_iteration() {
    let definition = LSystemDefinition::new("]", Rules::new(), 90.0, 2);
    assert!(matches!(
        growth_2d(&definition, "id"),
        Err(LSystemError::StackUnderflow {
            index: 0,
            iteration: Some(0)
        })
    ));

    // the first generation is fine, the second one pops too much
    let definition = LSystemDefinition::new("F", Rules::new().with_rule('F', "F]"), 90.0, 3);
    let result = growth_2d(&definition, "id");
    assert!(
        matches!(
            result,
            Err(LSystemError::StackUnderflow {
                index: 1,
                iteration: Some(1)
            })
        ),
        "{result:?}"
    );
}

#[test]
fn test_final_3d() -> Result<(), LSystemError> {
    let definition = LSystemDefinition::new("F", Rules::new().with_rule('F', "F[&F]F"), 30.0, 2);
    for model in [OrientationModel::Frame, OrientationModel::EulerAngles] {
        let model_3d = final_3d(&definition, "tree", model)?;
        assert_eq!(model_3d.iteration, 2);
        assert_eq!(model_3d.file_stem, "tree_iteration_2");
        assert_eq!(model_3d.segments.len(), 9);
        assert_eq!(model_3d.mesh.edges.len(), 9);
        let (segments, mesh) =
            interpret_3d_with(&expand("F", &definition.rules, 2), 30.0, model)?;
        assert_eq!(model_3d.segments, segments);
        assert_eq!(model_3d.mesh, mesh);
    }
    Ok(())
}

#[test]
fn test_final_3d_underflow_reports_iteration() {
    let definition = LSystemDefinition::new("F", Rules::new().with_rule('F', "]F"), 90.0, 4);
    assert!(matches!(
        final_3d(&definition, "id", OrientationModel::Frame),
        Err(LSystemError::StackUnderflow {
            index: 0,
            iteration: Some(4)
        })
    ));
}

#[test]
fn test_limits() -> Result<(), LSystemError> {
    let definition = plant_definition().with_limits(ExpansionLimits::default().with_timeout(Duration::ZERO));
    assert!(matches!(
        growth_2d(&definition, "id"),
        Err(LSystemError::Timeout(_))
    ));
    assert!(matches!(
        final_3d(&definition, "id", OrientationModel::Frame),
        Err(LSystemError::Timeout(_))
    ));

    let definition = parse_definition(
        "axiom(\"F\")\nrule(\"F\", \"F[+F]F[-F]F\")\nangle(25)\niterations(2)\nmax_symbols(10)\n",
    )?;
    assert!(matches!(
        growth_2d(&definition, "id"),
        Err(LSystemError::Overflow(_))
    ));

    // nothing is expanded, so no limit can be hit
    let definition = LSystemDefinition::new("F", Rules::new(), 90.0, 0)
        .with_limits(ExpansionLimits::default().with_timeout(Duration::ZERO).with_max_symbols(0));
    assert_eq!(growth_2d(&definition, "id")?.len(), 1);
    Ok(())
}

#[test]
fn test_growth_2d_huge_iteration_count_times_out() {
    let definition = LSystemDefinition::new("F", Rules::new(), 90.0, u32::MAX)
        .with_limits(ExpansionLimits::default().with_timeout(Duration::from_millis(5)));
    let result = growth_2d(&definition, "id");
    assert!(matches!(result, Err(LSystemError::Timeout(_))), "{result:?}");

    let mut config = plant_config("lsystem_2d");
    let _ = config.insert(ITERATIONS_TAG.to_string(), u32::MAX.to_string());
    let _ = config.insert(
        TURTLE_SCRIPT_TAG.to_string(),
        "axiom(\"F\")\nangle(90)\ntimeout(0.005)\n".to_string(),
    );
    let results = process_batch(&[config, plant_config("lsystem_2d")]);
    assert!(matches!(results[0], Err(LSystemError::Timeout(_))));
    assert!(results[1].is_ok());
}

#[test]
fn test_options() -> Result<(), LSystemError> {
    let mut config = ConfigType::default();
    let _ = config.insert("count".to_string(), " 12 ".to_string());
    let _ = config.insert("word".to_string(), "twelve".to_string());

    assert!(config.does_option_exist("count"));
    assert!(!config.does_option_exist("missing"));
    assert_eq!(config.get_mandatory_option("word")?, "twelve");
    assert_eq!(config.get_parsed_option::<u32>("count")?, Some(12));
    assert_eq!(config.get_parsed_option::<u32>("missing")?, None);
    assert_eq!(config.get_mandatory_parsed_option::<u32>("count", Some(3))?, 12);
    assert_eq!(config.get_mandatory_parsed_option::<u32>("missing", Some(3))?, 3);
    assert!(matches!(
        config.get_mandatory_parsed_option::<u32>("missing", None),
        Err(LSystemError::MissingParameter(_))
    ));
    assert!(matches!(
        config.get_parsed_option::<u32>("word"),
        Err(LSystemError::InvalidParameter(_))
    ));
    assert!(matches!(
        config.get_mandatory_option("missing"),
        Err(LSystemError::MissingParameter(_))
    ));
    Ok(())
}

#[test]
fn test_process_command_2d() -> Result<(), LSystemError> {
    let mut config = plant_config("lsystem_2d");
    let _ = config.insert(IDENTIFIER_TAG.to_string(), "fern".to_string());
    let _ = config.insert(ITERATIONS_TAG.to_string(), "2".to_string());
    match process_command(&config)? {
        CommandResult::Growth2D(frames) => {
            assert_eq!(frames.len(), 3);
            assert_eq!(frames[2].file_stem, "fern_iteration_2");
            assert_eq!(frames[2].segments.len(), 25);
        }
        other => panic!("expected 2D frames, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_process_command_3d() -> Result<(), LSystemError> {
    let config = plant_config("lsystem_3d");
    let expected = final_3d(&plant_definition(), "lsystem", OrientationModel::Frame)?;
    assert_eq!(process_command(&config)?, CommandResult::Model3D(expected));

    let mut config = plant_config("lsystem_3d");
    let _ = config.insert(ORIENTATION_TAG.to_string(), "euler".to_string());
    let expected = final_3d(&plant_definition(), "lsystem", OrientationModel::EulerAngles)?;
    assert_eq!(process_command(&config)?, CommandResult::Model3D(expected));
    Ok(())
}

#[test]
fn test_process_command_errors() {
    let config = plant_config("lsystem_4d");
    assert!(matches!(
        process_command(&config),
        Err(LSystemError::InvalidParameter(_))
    ));

    let mut config = ConfigType::default();
    let _ = config.insert(COMMAND_TAG.to_string(), "lsystem_2d".to_string());
    assert!(matches!(
        process_command(&config),
        Err(LSystemError::MissingParameter(_))
    ));

    let mut config = plant_config("lsystem_3d");
    let _ = config.insert(ORIENTATION_TAG.to_string(), "quaternion".to_string());
    assert!(matches!(
        process_command(&config),
        Err(LSystemError::InvalidParameter(_))
    ));

    let mut config = plant_config("lsystem_2d");
    let _ = config.insert(ITERATIONS_TAG.to_string(), "many".to_string());
    assert!(matches!(
        process_command(&config),
        Err(LSystemError::InvalidParameter(_))
    ));
}

#[test]
fn test_process_batch() -> Result<(), LSystemError> {
    let mut first = plant_config("lsystem_2d");
    let _ = first.insert(IDENTIFIER_TAG.to_string(), "first".to_string());
    let broken = plant_config("no_such_command");
    let mut last = plant_config("lsystem_3d");
    let _ = last.insert(IDENTIFIER_TAG.to_string(), "last".to_string());

    let results = process_batch(&[first.clone(), broken, last.clone()]);
    assert_eq!(results.len(), 3);
    assert!(results[1].is_err());
    match (&results[0], &results[2]) {
        (Ok(CommandResult::Growth2D(frames)), Ok(CommandResult::Model3D(model))) => {
            assert_eq!(frames[0].file_stem, "first_iteration_0");
            assert_eq!(model.file_stem, "last_iteration_3");
        }
        other => panic!("unexpected results {other:?}"),
    }
    // a batch gives the same answers as running the jobs one by one
    assert_eq!(results[0].as_ref().ok(), Some(&process_command(&first)?));
    assert_eq!(results[2].as_ref().ok(), Some(&process_command(&last)?));
    Ok(())
}
