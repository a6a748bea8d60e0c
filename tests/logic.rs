use reckon::{EvalError, ExpressionOptions};

#[macro_use]
mod cases;

// Division by zero only raises under these options.
const GUARDED: ExpressionOptions =
    ExpressionOptions::OVERFLOW_PROTECTION.union(ExpressionOptions::DECIMAL_AS_DEFAULT);

test_case! {
    name: or_short_circuits,
    input: "true or (1/0)",
    options: GUARDED,
    value: true,
}

test_case! {
    name: and_short_circuits,
    input: "false and (1/0) > 1",
    options: GUARDED,
    value: false,
}

test_case! {
    name: reached_operand_raises,
    input: "true and (1/0) > 1",
    options: GUARDED,
    error: EvalError::DivideByZero,
}

test_case! {
    name: short_circuit_skips_resolution,
    input: "false and undefinedName",
    value: false,
}

test_case! {
    name: guarded_division,
    input: "qty != 0 and 10 / qty > 3",
    value: true,
}

test_case! {
    name: ternary_evaluates_one_branch,
    input: "true ? 1 : (1/0)",
    options: GUARDED,
    value: 1,
}

test_case! {
    name: if_builtin_is_lazy,
    input: "if(qty > 2, 'many', 1/0)",
    options: GUARDED,
    display: "many",
}

test_case! {
    name: ifs_picks_first_true_condition,
    input: "ifs(qty = 1, 'one', qty = 3, 'three', 'other')",
    display: "three",
}

test_case! {
    name: in_builtin,
    input: "in(qty, 1, 2, 3)",
    value: true,
}

test_case! {
    name: membership_in_list,
    input: "2 in (1, 2, 3)",
    value: true,
}

test_case! {
    name: negated_membership,
    input: "5 not in (1, 2, 3)",
    value: true,
}

test_case! {
    name: membership_in_list_parameter,
    input: "'red' in tags and 'blue' not in tags",
    value: true,
}

test_case! {
    name: substring_membership,
    input: "'ell' in 'hello'",
    value: true,
}

test_case! {
    name: like_wildcards,
    input: "name like 'A%' and name like 'A_a'",
    value: true,
}

test_case! {
    name: like_is_case_sensitive,
    input: "name like 'a_a'",
    value: false,
}

test_case! {
    name: like_case_insensitive,
    input: "name like 'a_a'",
    options: ExpressionOptions::CASE_INSENSITIVE_STRING_COMPARER,
    value: true,
}

test_case! {
    name: not_like,
    input: "name not like '%x%'",
    value: true,
}

test_case! {
    name: keyword_not,
    input: "not (qty > 5)",
    value: true,
}

test_case! {
    name: not_directly_before_paren_is_a_call,
    input: "not(qty > 5)",
    error: EvalError::FunctionNotFound { name: "not".to_string() },
}

test_case! {
    name: symbol_spellings,
    input: "(true && !false) || false",
    value: true,
}

test_case! {
    name: undefined_parameter,
    input: "undefinedName",
    error: EvalError::ParameterNotDefined { name: "undefinedName".to_string() },
}

test_case! {
    name: undefined_function,
    input: "undefinedFn()",
    error: EvalError::FunctionNotFound { name: "undefinedFn".to_string() },
}
