use modecalc::*;

use std::sync::Arc;

#[test]
fn mathematics_precedence() {
    let store = VariableStore::new();
    assert_eq!(evaluate("2+3*4", Mode::mathematics, &store), Ok(14.0));
    assert_eq!(evaluate("-(2+3)*4/8", Mode::mathematics, &store), Ok(-2.5));
}

#[test]
fn programming_truncates_and_shows_twos_complement() {
    let store = VariableStore::new();
    assert_eq!(evaluate("7/2", Mode::programming, &store), Ok(3.0));

    let minus_one = evaluate("-1", Mode::programming, &store).unwrap();
    let output = format(minus_one);
    assert_eq!(output.hex.replace(' ', ""), "FFFFFFFFFFFFFFFF");
    assert_eq!(output.bits.replace(' ', ""), "1".repeat(64));
}

#[test]
fn whole_number_gating() {
    assert_eq!(
        format(4.0),
        FormattedOutput{decimal: "4".into(), hex: "4".into(), bits: "100".into()}
    );
    assert_eq!(
        format(4.5),
        FormattedOutput{decimal: "4.5".into(), hex: "".into(), bits: "".into()}
    );
}

#[test]
fn variables_resolve_in_any_mode() {
    let store = VariableStore::new();
    store.upsert("x", "2+2", Mode::mathematics).unwrap();
    assert_eq!(evaluate("x", Mode::mathematics, &store), Ok(4.0));
    assert_eq!(evaluate("x", Mode::programming, &store), Ok(4.0));
}

#[test]
fn cyclic_variables_fail_instead_of_hanging() {
    let store = VariableStore::new();
    store.upsert("a", "b", Mode::mathematics).unwrap();
    store.upsert("b", "a", Mode::mathematics).unwrap();
    let error = evaluate("a", Mode::mathematics, &store).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::cyclic_reference);
}

#[test]
fn mode_commands() {
    let mut controller = Controller::default();
    controller.on_enter_command("p");

    let command = controller.on_enter_command("m");
    assert_eq!(command, Command::switched(Mode::mathematics));
    assert!(command.clears_input());
    assert_eq!(controller.mode(), Mode::mathematics);

    assert_eq!(controller.on_enter_command("xyz"), Command::not_a_command);
    assert_eq!(controller.mode(), Mode::mathematics);
}

#[test]
fn blank_input() {
    let controller = Controller::default();
    assert_eq!(
        controller.on_input_changed("   "),
        FormattedOutput{decimal: "".into(), hex: "".into(), bits: "".into()}
    );
}

#[test]
fn typing_session() {
    let mut controller = Controller::new(Arc::new(VariableStore::new()));
    assert_eq!(mode_label(controller.mode()), "M");

    assert_eq!(controller.on_input_changed("1.5*4").decimal, "6");
    assert_eq!(controller.on_store_command("six", "1.5*4"), Ok("six".into()));

    controller.on_enter_command("p");
    assert_eq!(controller.mode_label(), "P");
    let output = controller.on_input_changed("six << 4 | 0xF");
    assert_eq!(output.decimal, "111");
    assert_eq!(output.hex, "6F");
    assert_eq!(output.bits, "110 1111");

    // half-typed input blanks the display instead of showing stale output
    assert!(controller.on_input_changed("six << ").is_blank());
    assert!(controller.on_input_changed("six / 0").is_blank());

    controller.on_store_command("six", "5").unwrap();
    assert_eq!(controller.on_input_changed("six").decimal, "5");
    assert!(controller.on_store_command(" ", "5").is_err());
}
