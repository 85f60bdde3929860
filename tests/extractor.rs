//! Tests for graph extraction: chain arity, degradation and diagnostics.
mod common;
use common::*;
use socs_blocks::error::DiagnosticClass;
use socs_blocks::prelude::*;
use socs_blocks::program::*;

fn enter(name: &str) -> Statement {
    Statement::EnterPhase(name.to_string())
}

#[test]
fn test_chain_arity() {
    let workspace = Workspace::new();
    assert_eq!(extract(&workspace, None).value, Statement::Empty);

    let (workspace, first) = materialize(&enter("a"));
    assert_eq!(extract(&workspace, first).value, enter("a"));

    let names = ["a", "b", "c", "d"];
    let program = Statement::Block(names.iter().map(|n| enter(n)).collect());
    let (workspace, first) = materialize(&program);
    match extract(&workspace, first).value {
        Statement::Block(items) => {
            assert_eq!(items.len(), names.len());
            assert_eq!(items, names.iter().map(|n| enter(n)).collect::<Vec<_>>());
        }
        other => panic!("Expected a Block, got {:?}", other),
    }
}

#[test]
fn test_malformed_middle_statement_is_dropped() {
    let mut workspace = Workspace::new();
    let first = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "a")]);
    let broken = block(&mut workspace, "socs_set_number", &[("NAME", "x")]);
    let last = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "b")]);
    workspace.connect_next(first, broken).expect("Failed to link");
    workspace.connect_next(broken, last).expect("Failed to link");

    let extraction = extract(&workspace, Some(first));
    assert_eq!(
        extraction.value,
        Statement::Block(vec![enter("a"), enter("b")])
    );
    assert_eq!(extraction.diagnostics.len(), 1);

    let diagnostic = &extraction.diagnostics[0];
    assert_eq!(diagnostic.node, broken);
    assert_eq!(diagnostic.block_type, "socs_set_number");
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(
        diagnostic.error,
        ExtractError::MissingInput {
            input: "VALUE".to_string()
        }
    );
    assert_eq!(diagnostic.class(), DiagnosticClass::MissingRequiredInput);
}

#[test]
fn test_unconnected_branch_extracts_as_empty() {
    let mut workspace = Workspace::new();
    let conditional = block(&mut workspace, "socs_remade_if_else", &[]);
    let condition = block(&mut workspace, "logic_boolean", &[("BOOL", "TRUE")]);
    let otherwise = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "end")]);
    workspace
        .connect_value(conditional, "CONDITION", condition)
        .expect("Failed to connect condition");
    workspace
        .connect_statement(conditional, "GO_FALSE", otherwise)
        .expect("Failed to connect branch");

    let extraction = extract(&workspace, Some(conditional));
    assert!(extraction.is_clean());
    assert_eq!(
        extraction.value,
        Statement::Conditional {
            condition: BooleanExpression::Literal(true),
            go_true: Box::new(Statement::Empty),
            go_false: Box::new(enter("end")),
        }
    );
}

#[test]
fn test_innermost_failure_only_is_reported() {
    let mut workspace = Workspace::new();
    let deal = block(&mut workspace, "socs_player_advance", &[]);
    let count = block(&mut workspace, "socs_num_cards", &[]);
    let selector = block(&mut workspace, "socs_card_selector", &[("SELECTOR", "TOP")]);
    workspace
        .connect_value(deal, "ADVANCE", count)
        .expect("Failed to connect");
    workspace
        .connect_value(count, "CARD_COLLECTION", selector)
        .expect("Failed to connect");

    let extraction = extract(&workspace, Some(deal));
    assert_eq!(extraction.value, Statement::Empty);
    assert_eq!(extraction.diagnostics.len(), 1);

    let diagnostic = &extraction.diagnostics[0];
    assert_eq!(diagnostic.node, selector);
    assert_eq!(
        diagnostic.error,
        ExtractError::MissingInput {
            input: "ZONE".to_string()
        }
    );
    let path: Vec<(NodeId, &str)> = diagnostic
        .path
        .iter()
        .map(|s| (s.node, s.input.as_str()))
        .collect();
    assert_eq!(path, vec![(deal, "ADVANCE"), (count, "CARD_COLLECTION")]);
}

#[test]
fn test_case_any_never_has_a_condition() {
    let program = Statement::Offer {
        offer_to: PlayerCollectionExpression::AllPlayers,
        player_name: None,
        cases: vec![OfferCase {
            condition: None,
            message: "Anything".to_string(),
            choices: vec![],
            then: Statement::Empty,
        }],
    };
    let (mut workspace, first) = materialize(&program);

    let case = find_block(&workspace, "socs_offer_case_any");
    let stray = block(&mut workspace, "logic_boolean", &[("BOOL", "TRUE")]);
    workspace
        .connect_value(case, "FILTER", stray)
        .expect("Failed to connect stray filter");

    let extraction = extract(&workspace, first);
    assert!(extraction.is_clean());
    assert_eq!(extraction.value, program);
}

#[test]
fn test_invalid_filter_drops_only_that_case() {
    let program = Statement::Offer {
        offer_to: PlayerCollectionExpression::AllPlayers,
        player_name: Some("p".to_string()),
        cases: vec![
            OfferCase {
                condition: Some(BooleanExpression::Literal(true)),
                message: "First".to_string(),
                choices: vec![],
                then: Statement::Empty,
            },
            OfferCase {
                condition: None,
                message: "Second".to_string(),
                choices: vec![],
                then: Statement::Empty,
            },
        ],
    };
    let (mut workspace, first) = materialize(&program);
    let literal = find_block(&workspace, "logic_boolean");
    workspace
        .set_field(literal, "BOOL", "MAYBE")
        .expect("Failed to edit field");

    let extraction = extract(&workspace, first);
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::InvalidField {
            field: "BOOL".to_string(),
            value: "MAYBE".to_string()
        }
    );
    match extraction.value {
        Statement::Offer { cases, .. } => {
            assert_eq!(cases.len(), 1);
            assert_eq!(cases[0].message, "Second");
        }
        other => panic!("Expected an Offer, got {:?}", other),
    }
}

#[test]
fn test_type_mismatch_is_reported() {
    let mut workspace = Workspace::new();
    let set = block(&mut workspace, "socs_set_number", &[("NAME", "x")]);
    let wrong = block(&mut workspace, "socs_player_current", &[]);
    workspace
        .connect_value(set, "VALUE", wrong)
        .expect("Failed to connect");

    let extraction = extract(&workspace, Some(set));
    assert_eq!(extraction.value, Statement::Empty);
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].node, wrong);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::TypeMismatch {
            input: "VALUE".to_string(),
            expected: Category::Number,
            found: Category::Player,
        }
    );
    assert_eq!(
        extraction.diagnostics[0].class(),
        DiagnosticClass::SchemaMismatch
    );
}

#[test]
fn test_unknown_block_type_is_reported() {
    let mut workspace = Workspace::new();
    let first = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "a")]);
    let unknown = block(&mut workspace, "socs_teleport", &[]);
    workspace.connect_next(first, unknown).expect("Failed to link");

    let extraction = extract(&workspace, Some(first));
    assert_eq!(extraction.value, enter("a"));
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::UnknownBlockType("socs_teleport".to_string())
    );
    assert_eq!(
        extraction.diagnostics[0].class(),
        DiagnosticClass::UnknownNodeType
    );
}

#[test]
fn test_value_block_in_chain_is_not_a_statement() {
    let mut workspace = Workspace::new();
    let number = block(&mut workspace, "math_number", &[("NUM", "3")]);

    let extraction = extract(&workspace, Some(number));
    assert_eq!(extraction.value, Statement::Empty);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::NotAStatement {
            block_type: "math_number".to_string()
        }
    );
}

#[test]
fn test_unparsable_literal_is_reported() {
    let (mut workspace, first) = materialize(&Statement::AdvancePlayerState(
        NumberExpression::Literal(2),
    ));
    let literal = find_block(&workspace, "math_number");
    workspace
        .set_field(literal, "NUM", "two")
        .expect("Failed to edit field");

    let extraction = extract(&workspace, first);
    assert_eq!(extraction.value, Statement::Empty);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::InvalidField {
            field: "NUM".to_string(),
            value: "two".to_string()
        }
    );
}

#[test]
fn test_offer_without_player_name_is_reported() {
    let (mut workspace, first) = materialize(&create_shadowing_offer());
    let offer = find_block(&workspace, "socs_offer");
    workspace
        .set_field(offer, "PLAYER_NAME", "")
        .expect("Failed to clear field");

    let extraction = extract(&workspace, first);
    assert_eq!(extraction.value, Statement::Empty);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::MissingField {
            field: "PLAYER_NAME".to_string()
        }
    );
}

#[test]
fn test_aliases_resolve_to_canonical_blocks() {
    let registry = BlockRegistry::builder()
        .with_alias("legacy_enter", "socs_enter_phase")
        .with_alias("ignored", "no_such_block")
        .build();
    let mut workspace = Workspace::new();
    let node = block(&mut workspace, "legacy_enter", &[("PHASE_NAME", "a")]);

    let extraction = Extractor::new(&workspace, &registry).extract_statement_chain(Some(node));
    assert!(extraction.is_clean());
    assert_eq!(extraction.value, enter("a"));
    assert_eq!(registry.kind("ignored"), None);
}

#[test]
fn test_duplicate_and_unnamed_phases_are_dropped() {
    let mut workspace = Workspace::new();
    let first = block(&mut workspace, "socs_phase", &[("PHASE", "main")]);
    let body = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "x")]);
    workspace.connect_next(first, body).expect("Failed to link");
    let duplicate = block(&mut workspace, "socs_phase", &[("PHASE", "main")]);
    let unnamed = block(&mut workspace, "socs_phase", &[]);

    let registry = BlockRegistry::default();
    let extraction = Extractor::new(&workspace, &registry).extract_phases();

    assert_eq!(extraction.value.len(), 1);
    assert_eq!(extraction.value["main"].evaluate, enter("x"));
    assert_eq!(extraction.diagnostics.len(), 2);
    assert_eq!(extraction.diagnostics[0].node, duplicate);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::DuplicatePhase("main".to_string())
    );
    assert_eq!(extraction.diagnostics[1].node, unnamed);
}

#[test]
fn test_unresolved_reference_is_a_warning() {
    let program = Statement::MoveCardsTo {
        source: CardCollectionExpression::GetVariable("ghost".to_string()),
        dest: zone_var("deck"),
    };
    let (workspace, first) = materialize(&program);
    let registry = BlockRegistry::default();

    let extraction = Extractor::builder(&workspace, &registry)
        .check_scopes(true)
        .with_global(Category::Zone, "deck")
        .build()
        .extract_statement_chain(first);

    assert_eq!(extraction.value, program);
    assert!(!extraction.has_errors());
    let warnings: Vec<_> = extraction.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].error,
        ExtractError::UnresolvedVariable {
            name: "ghost".to_string(),
            category: Category::CardCollection,
        }
    );
    assert_eq!(warnings[0].class(), DiagnosticClass::UnresolvedReference);
}

#[test]
fn test_extraction_leaves_graph_untouched() {
    let (workspace, first) = materialize(&create_full_program());
    let before = format!("{}", WorkspaceTree { workspace: &workspace });
    let _ = extract(&workspace, first);
    let after = format!("{}", WorkspaceTree { workspace: &workspace });
    assert_eq!(before, after);
}

#[test]
fn test_single_statement_ignores_its_successors() {
    let mut workspace = Workspace::new();
    let first = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "a")]);
    let second = block(&mut workspace, "socs_enter_phase", &[("PHASE_NAME", "b")]);
    workspace.connect_next(first, second).expect("Failed to link");
    let broken = block(&mut workspace, "socs_shuffle", &[]);

    let registry = BlockRegistry::default();
    let extractor = Extractor::new(&workspace, &registry);
    assert_eq!(extractor.extract_statement(first).value, Some(enter("a")));

    let extraction = extractor.extract_statement(broken);
    assert_eq!(extraction.value, None);
    assert_eq!(
        extraction.diagnostics[0].error,
        ExtractError::MissingInput {
            input: "ZONES".to_string()
        }
    );
}
