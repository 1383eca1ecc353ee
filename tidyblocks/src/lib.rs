//! TidyBlocks persistence codec
//!
//! Converts TidyBlocks programs to and from nested JSON arrays:
//!
//! ```text
//! [@program, [@pipeline, name, [@transform, "read", path], ...], ...]
//! ```
//!
//! Expressions and stages are decoded through per-family registries keyed by
//! discriminator and variant name; pipelines and programs are fixed
//! containers around them. Every decode failure is a `MalformedEncoding`
//! carrying the JSON Pointer of the offending value.

mod envelope;
mod pipeline;
mod program;

pub use pipeline::Pipeline;
pub use program::Program;

pub use tidyblocks_core::{
    codes, DateTime, DateTimeError, Family, Literal, MalformedEncoding, Number, NumberError,
};
pub use tidyblocks_expr::{self as expr, BinaryOp, Conversion, DateField, Expression, TernaryOp, TypeCheck, UnaryOp};
pub use tidyblocks_registry::{DecodeContext, Node, Tagged, DEFAULT_MAX_DEPTH};
pub use tidyblocks_stage::{self as stage, Aggregation, Plot, Stage, StatTest, Transform};

use serde_json::{json, Value};

/// Everything needed to build and persist programs
pub mod prelude {
    pub use crate::{
        Aggregation, DateTime, DecodeContext, Expression, Literal, MalformedEncoding, Node,
        Pipeline, Program, Stage, StatTest, Tagged,
    };
}

/// Every discriminator and registered variant, as JSON
///
/// Editors use this to build block palettes without hard-coding names.
pub fn catalog() -> Value {
    json!({
        "expression": tidyblocks_expr::registry().catalog(),
        "stage": tidyblocks_stage::registry().catalog(),
        "pipeline": { "kind": Pipeline::KIND },
        "program": { "kind": Program::KIND },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tidyblocks_expr::kinds::{ARITHMETIC, NEGATE, NULLARY, TERNARY};
    use tidyblocks_stage::kinds::TRANSFORM;

    fn nested_filter() -> Stage {
        Stage::filter(Expression::if_else(
            Expression::not(Expression::constant(true)),
            Expression::power(Expression::constant(1), Expression::constant(2)),
            Expression::constant(0),
        ))
    }

    mod pipeline_tests {
        use super::*;

        #[test]
        fn test_single_pipeline_to_json() {
            let path = "/path/to/file";
            let pipeline = Pipeline::new("pipe", [Stage::read(path), Stage::sort(["left"], Some(true))]);
            assert_eq!(
                pipeline.encode(),
                json!([
                    Pipeline::KIND,
                    "pipe",
                    [TRANSFORM, "read", path],
                    [TRANSFORM, "sort", ["left"], true]
                ])
            );
        }

        #[test]
        fn test_json_to_single_pipeline() {
            let fixture = json!([
                Pipeline::KIND,
                "name",
                [TRANSFORM, "read", "colors.csv"],
                [TRANSFORM, "sort", ["left", "right"], false]
            ]);
            let actual = Pipeline::decode(&fixture).unwrap();
            let expected = Pipeline::new(
                "name",
                [Stage::read("colors.csv"), Stage::sort(["left", "right"], Some(false))],
            );
            assert_eq!(actual, expected);
            assert_eq!(actual.encode(), fixture);
        }

        #[test]
        fn test_empty_pipeline() {
            let pipeline = Pipeline::new("empty", []);
            assert!(pipeline.is_empty());
            assert_eq!(pipeline.encode(), json!([Pipeline::KIND, "empty"]));
            assert_eq!(Pipeline::decode(&pipeline.encode()).unwrap(), pipeline);
        }

        #[test]
        fn test_stage_order_is_kept() {
            let pipeline = Pipeline::new("p", [])
                .with_stage(Stage::read("a.csv"))
                .with_stage(Stage::unique(["x"]))
                .with_stage(Stage::sort(["x"], None))
                .with_stage(Stage::notify("done"));
            let back = Pipeline::decode(&pipeline.encode()).unwrap();
            let names: Vec<&str> = back.stages().iter().map(Tagged::name).collect();
            assert_eq!(names, vec!["read", "unique", "sort", "notify"]);
        }

        #[test]
        fn test_missing_name() {
            let err = Pipeline::decode(&json!([Pipeline::KIND])).unwrap_err();
            assert_eq!(err.code, codes::MISSING_NAME);
            let err = Pipeline::decode(&json!([Pipeline::KIND, 5])).unwrap_err();
            assert_eq!(err.code, codes::ARG_TYPE);
            assert_eq!(err.path, "/1");
        }

        #[test]
        fn test_bad_stage_is_located() {
            let fixture = json!([Pipeline::KIND, "p", [TRANSFORM, "read", "a.csv"], [TRANSFORM, "join", "a"]]);
            let err = Pipeline::decode(&fixture).unwrap_err();
            assert_eq!(err.code, codes::ARG_COUNT);
            assert_eq!(err.path, "/3");
        }

        #[test]
        fn test_dependencies() {
            let pipeline = Pipeline::new(
                "joined",
                [Stage::join("left", "a", "right", "b"), Stage::join("left", "c", "other", "d")],
            );
            assert_eq!(pipeline.dependencies(), vec!["left", "right", "other"]);
        }
    }

    mod program_tests {
        use super::*;

        #[test]
        fn test_multi_pipeline_program_to_json() {
            let program = Program::new([
                Pipeline::new("first", [Stage::read("/path/to/first")]),
                Pipeline::new("second", [Stage::read("/path/to/second"), Stage::unique(["left"])]),
                Pipeline::new("third", [Stage::read("/path/to/third"), Stage::notify("signal")]),
            ]);
            assert_eq!(
                program.encode(),
                json!([
                    Program::KIND,
                    [Pipeline::KIND, "first", [TRANSFORM, "read", "/path/to/first"]],
                    [
                        Pipeline::KIND,
                        "second",
                        [TRANSFORM, "read", "/path/to/second"],
                        [TRANSFORM, "unique", ["left"]]
                    ],
                    [
                        Pipeline::KIND,
                        "third",
                        [TRANSFORM, "read", "/path/to/third"],
                        [TRANSFORM, "notify", "signal"]
                    ]
                ])
            );
        }

        #[test]
        fn test_json_to_multi_pipeline_program() {
            let fixture = json!([
                Program::KIND,
                [Pipeline::KIND, "alpha", [TRANSFORM, "read", "colors.csv"]],
                [
                    Pipeline::KIND,
                    "beta",
                    [TRANSFORM, "read", "colors.csv"],
                    [TRANSFORM, "unique", ["red"]]
                ],
                [
                    Pipeline::KIND,
                    "gamma",
                    [TRANSFORM, "read", "colors.csv"],
                    [TRANSFORM, "notify", "signal"]
                ]
            ]);
            let expected = Program::new([
                Pipeline::new("alpha", [Stage::read("colors.csv")]),
                Pipeline::new("beta", [Stage::read("colors.csv"), Stage::unique(["red"])]),
                Pipeline::new("gamma", [Stage::read("colors.csv"), Stage::notify("signal")]),
            ]);
            let actual = Program::decode(&fixture).unwrap();
            assert_eq!(actual, expected);
            assert_eq!(actual.encode(), fixture);
            assert_eq!(actual.pipeline("beta").map(Pipeline::len), Some(2));
        }

        #[test]
        fn test_nested_expression_round_trip() {
            let program = Program::new([Pipeline::new("deep", [Stage::read("a.csv"), nested_filter()])]);
            let encoded = program.encode();
            assert_eq!(
                encoded[1][3],
                json!([
                    TRANSFORM,
                    "filter",
                    [
                        TERNARY,
                        "ifElse",
                        [NEGATE, "not", [NULLARY, "constant", true]],
                        [ARITHMETIC, "power", [NULLARY, "constant", 1], [NULLARY, "constant", 2]],
                        [NULLARY, "constant", 0]
                    ]
                ])
            );
            let back = Program::decode(&encoded).unwrap();
            assert_eq!(back, program);
            assert_eq!(back.encode(), encoded);
        }

        #[test]
        fn test_error_deep_inside_program() {
            let fixture = json!([
                Program::KIND,
                [Pipeline::KIND, "ok", [TRANSFORM, "read", "a.csv"]],
                [
                    Pipeline::KIND,
                    "broken",
                    [TRANSFORM, "read", "b.csv"],
                    [TRANSFORM, "filter", [ARITHMETIC, "add", [NULLARY, "constant", 1], [NULLARY, "colum", "x"]]]
                ]
            ]);
            let err = Program::decode(&fixture).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_VARIANT);
            assert_eq!(err.family, Family::Expression);
            assert_eq!(err.path, "/2/3/2/3");
            assert_eq!(err.name.as_deref(), Some("colum"));
            assert!(err.suggestion.unwrap().contains("column"));
        }

        #[test]
        fn test_depth_limit() {
            let mut expr = Expression::constant(1);
            for _ in 0..10 {
                expr = Expression::negate(expr);
            }
            let encoded = Program::new([Pipeline::new("p", [Stage::filter(expr)])]).encode();

            let mut ctx = DecodeContext::new().with_max_depth(8);
            let err = Program::decode_with(&encoded, &mut ctx).unwrap_err();
            assert_eq!(err.code, codes::DEPTH_LIMIT);
            assert_eq!(ctx.depth(), 0);
            assert!(Program::decode(&encoded).is_ok());
        }

        #[test]
        fn test_pipeline_is_not_a_program() {
            let pipeline = Pipeline::new("p", [Stage::read("a.csv")]).encode();
            let err = Program::decode(&pipeline).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
            let err = Program::decode(&json!([Program::KIND, [TRANSFORM, "read", "a.csv"]])).unwrap_err();
            assert_eq!(err.code, codes::UNKNOWN_KIND);
            assert_eq!(err.path, "/1");
        }
    }

    mod family_tests {
        use super::*;

        #[test]
        fn test_whoops_rejected_everywhere() {
            let whoops = json!(["@whoops", "whoops"]);
            assert_eq!(Expression::decode(&whoops).unwrap_err().family, Family::Expression);
            assert_eq!(Stage::decode(&whoops).unwrap_err().family, Family::Stage);
            assert_eq!(Pipeline::decode(&whoops).unwrap_err().family, Family::Pipeline);
            assert_eq!(Program::decode(&whoops).unwrap_err().family, Family::Program);
            for err in [
                Expression::decode(&whoops).unwrap_err(),
                Stage::decode(&whoops).unwrap_err(),
                Pipeline::decode(&whoops).unwrap_err(),
                Program::decode(&whoops).unwrap_err(),
            ] {
                assert_eq!(err.code, codes::UNKNOWN_KIND);
                assert_eq!(err.kind.as_deref(), Some("@whoops"));
            }
        }

        #[test]
        fn test_non_arrays_rejected() {
            for value in [json!(55), json!("x"), json!({"a": 1}), json!(null)] {
                let err = Program::decode(&value).unwrap_err();
                assert_eq!(err.code, codes::NOT_AN_ARRAY);
                assert_eq!(err.path, "");
            }
            assert_eq!(Pipeline::decode(&json!([])).unwrap_err().code, codes::MISSING_KIND);
        }

        #[test]
        fn test_text_helpers() {
            let program = Program::new([Pipeline::new("p", [Stage::read("a.csv")])]);
            let text = program.to_json_string();
            assert_eq!(text, r#"["@program",["@pipeline","p",["@transform","read","a.csv"]]]"#);
            assert_eq!(Program::from_json_str(&text).unwrap(), program);
            assert_eq!(Program::from_json_str("[").unwrap_err().code, codes::INVALID_JSON);
        }

        #[test]
        fn test_text_keeps_float_digits() {
            for value in [1.0715660391465826e-75, -1.603964615428183e143, 0.1 + 0.2, 5e-324] {
                let expr = Expression::number(value).unwrap();
                let back = Expression::from_json_str(&expr.to_json_string()).unwrap();
                assert_eq!(back, expr, "{:e}", value);

                let program = Program::new([Pipeline::new(
                    "p",
                    [StatTest::t_test_one_sample(value, 0.05, "x").unwrap().into(), Stage::filter(expr)],
                )]);
                let text = serde_json::to_string(&program).unwrap();
                let restored: Program = serde_json::from_str(&text).unwrap();
                assert_eq!(restored, program, "{:e}", value);
            }
        }

        #[test]
        fn test_serde_embedding() {
            #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
            struct Saved {
                title: String,
                program: Program,
            }
            let saved = Saved {
                title: "demo".to_string(),
                program: Program::new([Pipeline::new("p", [nested_filter()])]),
            };
            let text = serde_json::to_string(&saved).unwrap();
            let back: Saved = serde_json::from_str(&text).unwrap();
            assert_eq!(back, saved);
        }
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn test_catalog_lists_every_variant() {
            let catalog = catalog();
            assert_eq!(catalog["pipeline"]["kind"], json!(Pipeline::KIND));
            assert_eq!(catalog["program"]["kind"], json!(Program::KIND));

            let count = |family: &str| -> usize {
                catalog[family]["kinds"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|k| k["variants"].as_array().unwrap().len())
                    .sum()
            };
            assert_eq!(count("expression"), expr::registry().len());
            assert_eq!(count("stage"), stage::registry().len());
        }

        #[test]
        fn test_catalog_argument_metadata() {
            let catalog = catalog();
            let transforms = &catalog["stage"]["kinds"][0];
            assert_eq!(transforms["kind"], json!(TRANSFORM));
            let sort = transforms["variants"]
                .as_array()
                .unwrap()
                .iter()
                .find(|v| v["name"] == "sort")
                .unwrap();
            assert_eq!(sort["args"][1]["optional"], json!(true));
        }
    }
}
