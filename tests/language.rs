use std::fs;

use walkdir::WalkDir;

/// Runs a program and returns everything it printed.
fn run(source: &str) -> String {
    let mut output: Vec<u8> = Vec::new();
    if let Err(e) = picopy::run_program(source, &mut output) {
        panic!("Script failed: {e}\n{source}");
    }
    String::from_utf8(output).expect("program output was not valid UTF-8")
}

/// Runs a program that must fail and returns the error message.
fn run_err(source: &str) -> String {
    let mut output: Vec<u8> = Vec::new();
    match picopy::run_program(source, &mut output) {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{source}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "ppy"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut output: Vec<u8> = Vec::new();
        if let Err(e) = picopy::run_program(&source, &mut output) {
            panic!("Demo script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(run("print 1 + 2 * 3"), "7\n");
    assert_eq!(run("print (1 + 2) * 3"), "9\n");
    assert_eq!(run("print 10 - 2 - 3"), "5\n");
    assert_eq!(run("print 7 / 2"), "3\n");
    assert_eq!(run("print 2 * 3 + 4 / 2"), "8\n");
}

#[test]
fn string_concatenation() {
    assert_eq!(run("x = \"ab\"\nprint x + \"cd\""), "abcd\n");
    assert_eq!(run("print \"\" + \"a\""), "a\n");
}

#[test]
fn if_else_branches_on_truthiness() {
    assert_eq!(run("if 0:\n  print 1\nelse:\n  print 2"), "2\n");
    assert_eq!(run("if 1:\n  print 1\nelse:\n  print 2"), "1\n");
    assert_eq!(run("if \"\":\n  print 1\nelse:\n  print 2"), "2\n");
    assert_eq!(run("if \"x\":\n  print 1"), "1\n");
    assert_eq!(run("if 0:\n  print 1"), "");
}

#[test]
fn nested_if_else() {
    let source = "x = 5\n\
                  if x > 2:\n  \
                    if x > 4:\n    \
                      print \"big\"\n  \
                    else:\n    \
                      print \"mid\"\n\
                  else:\n  \
                    print \"small\"\n";
    assert_eq!(run(source), "big\n");
}

#[test]
fn classes_with_constructor_and_methods() {
    let source = "class P:\n\
                  \x20 def __init__(n):\n\
                  \x20   self.n = n\n\
                  \x20 def greet():\n\
                  \x20   print \"hi\", self.n\n\
                  p = P(\"A\")\n\
                  p.greet()\n";
    assert_eq!(run(source), "hi A\n");
}

#[test]
fn inheritance_resolves_through_the_parent_chain() {
    let source = "class A:\n\
                  \x20 def f():\n\
                  \x20   return 1\n\
                  class B(A):\n\
                  \x20 def g():\n\
                  \x20   return self.f() + 10\n\
                  print B().g()\n";
    assert_eq!(run(source), "11\n");
}

#[test]
fn overriding_wins_over_the_parent() {
    let source = "class A:\n\
                  \x20 def who():\n\
                  \x20   return \"A\"\n\
                  \x20 def hello():\n\
                  \x20   return self.who()\n\
                  class B(A):\n\
                  \x20 def who():\n\
                  \x20   return \"B\"\n\
                  print A().hello(), B().hello()\n";
    assert_eq!(run(source), "A B\n");
}

#[test]
fn none_prints_and_stringifies() {
    assert_eq!(run("print None"), "None\n");
    assert_eq!(run("print str(None)"), "None\n");
    assert_eq!(run("print str(42)"), "42\n");
    assert_eq!(run("print str(True), str(False)"), "True False\n");
    assert_eq!(run("print str(\"ab\")"), "ab\n");
}

#[test]
fn print_separates_with_spaces() {
    assert_eq!(run("print 1, \"a\", True, None"), "1 a True None\n");
    assert_eq!(run("print"), "\n");
}

#[test]
fn short_circuit_skips_the_right_operand() {
    // `boom` is undefined; evaluating it would fail the program.
    assert_eq!(run("print True or boom"), "True\n");
    assert_eq!(run("print False and boom"), "False\n");
    assert_eq!(run("print 0 or 2"), "True\n");
    assert_eq!(run("print 1 and 0"), "False\n");
}

#[test]
fn short_circuit_observable_through_a_probe() {
    let source = "class Probe:\n\
                  \x20 def __init__():\n\
                  \x20   self.hits = 0\n\
                  \x20 def bump():\n\
                  \x20   self.hits = self.hits + 1\n\
                  \x20   return True\n\
                  p = Probe()\n\
                  x = False and p.bump()\n\
                  y = True or p.bump()\n\
                  print p.hits\n\
                  z = True and p.bump()\n\
                  print p.hits\n";
    assert_eq!(run(source), "0\n1\n");
}

#[test]
fn truthiness_of_primitives() {
    assert_eq!(run("print not 0, not 1, not \"\", not \"a\", not None"),
               "True False True False True\n");
    assert_eq!(run("print not True, not False"), "False True\n");
}

#[test]
fn class_instances_are_always_falsy() {
    let source = "class Empty:\n\
                  \x20 def nothing():\n\
                  \x20   return None\n\
                  if Empty():\n\
                  \x20 print \"truthy\"\n\
                  else:\n\
                  \x20 print \"falsy\"\n\
                  if Empty:\n\
                  \x20 print \"class truthy\"\n\
                  else:\n\
                  \x20 print \"class falsy\"\n";
    assert_eq!(run(source), "falsy\nclass falsy\n");
}

#[test]
fn comparisons_on_primitives() {
    assert_eq!(run("print 1 < 2, 1 <= 2, 2 <= 2, 2 > 1, 2 >= 2, 1 == 1, 1 != 2"),
               "True True True True True True True\n");
    assert_eq!(run("print 2 < 1, 2 <= 1, 1 > 2, 1 >= 2, 1 == 2, 1 != 1"),
               "False False False False False False\n");
    assert_eq!(run("print \"a\" < \"b\", \"a\" == \"a\", \"b\" > \"a\""), "True True True\n");
    assert_eq!(run("print False < True, True > False, False == False"), "True True True\n");
    assert_eq!(run("print None == None, None != None"), "True False\n");
}

#[test]
fn comparison_hooks_and_their_derived_identities() {
    let source = "class V:\n\
                  \x20 def __init__(x):\n\
                  \x20   self.x = x\n\
                  \x20 def __eq__(other):\n\
                  \x20   return self.x == other.x\n\
                  \x20 def __lt__(other):\n\
                  \x20   return self.x < other.x\n\
                  a = V(1)\n\
                  b = V(2)\n\
                  print a < b, a == b, a != b, a <= b, a > b, a >= b\n\
                  c = V(1)\n\
                  print a == c, a != c, a <= c, a >= c\n";
    assert_eq!(run(source), "True False True True False False\nTrue False True True\n");
}

#[test]
fn instances_are_shared_not_copied() {
    let source = "class Person:\n\
                  \x20 def __init__():\n\
                  \x20   self.name = \"?\"\n\
                  p = Person()\n\
                  q = p\n\
                  q.name = \"x\"\n\
                  print p.name\n";
    assert_eq!(run(source), "x\n");
}

#[test]
fn str_hook_drives_printing() {
    let source = "class Point:\n\
                  \x20 def __init__(x, y):\n\
                  \x20   self.x = x\n\
                  \x20   self.y = y\n\
                  \x20 def __str__():\n\
                  \x20   return str(self.x) + \":\" + str(self.y)\n\
                  p = Point(1, 2)\n\
                  print p\n\
                  print str(p)\n";
    assert_eq!(run(source), "1:2\n1:2\n");
}

#[test]
fn instances_without_str_print_an_identity() {
    let source = "class Blank:\n\
                  \x20 def nothing():\n\
                  \x20   return None\n\
                  print Blank()\n";
    let output = run(source);
    assert!(output.trim_end().starts_with("0x"), "unexpected identity: {output:?}");
}

#[test]
fn classes_print_their_name() {
    let source = "class Widget:\n\
                  \x20 def nothing():\n\
                  \x20   return None\n\
                  print Widget\n";
    assert_eq!(run(source), "Class Widget\n");
}

#[test]
fn add_hook_on_instances() {
    let source = "class Vec:\n\
                  \x20 def __init__(x):\n\
                  \x20   self.x = x\n\
                  \x20 def __add__(other):\n\
                  \x20   return self.x + other.x\n\
                  print Vec(1) + Vec(2)\n";
    assert_eq!(run(source), "3\n");
}

#[test]
fn method_call_on_non_instance_yields_none() {
    assert_eq!(run("x = 5\nprint x.foo()"), "None\n");
    assert_eq!(run("s = \"ab\"\nprint s.upper()"), "None\n");
}

#[test]
fn missing_method_or_arity_mismatch_yields_none() {
    let source = "class A:\n\
                  \x20 def f():\n\
                  \x20   return 1\n\
                  print A().missing()\n\
                  print A().f(1, 2)\n\
                  print A().f()\n";
    assert_eq!(run(source), "None\nNone\n1\n");
}

#[test]
fn init_is_skipped_when_arity_does_not_match() {
    let source = "class Person:\n\
                  \x20 def set_name(name):\n\
                  \x20   self.name = name\n\
                  p = Person()\n\
                  p.set_name(\"Ivan\")\n\
                  print p.name\n";
    assert_eq!(run(source), "Ivan\n");
}

#[test]
fn return_exits_the_method_early() {
    let source = "class A:\n\
                  \x20 def f(x):\n\
                  \x20   if x > 0:\n\
                  \x20     return \"pos\"\n\
                  \x20   return \"non-pos\"\n\
                  print A().f(1), A().f(0)\n";
    assert_eq!(run(source), "pos non-pos\n");
}

#[test]
fn a_method_without_return_yields_none() {
    let source = "class A:\n\
                  \x20 def f():\n\
                  \x20   x = 1\n\
                  print A().f()\n";
    assert_eq!(run(source), "None\n");
}

#[test]
fn methods_chain_on_call_results() {
    let source = "class Counter:\n\
                  \x20 def __init__():\n\
                  \x20   self.n = 0\n\
                  \x20 def add(k):\n\
                  \x20   self.n = self.n + k\n\
                  \x20   return self\n\
                  \x20 def total():\n\
                  \x20   return self.n\n\
                  print Counter().add(1).add(2).total()\n";
    assert_eq!(run(source), "3\n");
}

#[test]
fn dotted_chains_read_nested_fields() {
    let source = "class Point:\n\
                  \x20 def __init__(x):\n\
                  \x20   self.x = x\n\
                  class Circle:\n\
                  \x20 def __init__(center):\n\
                  \x20   self.center = center\n\
                  c = Circle(Point(7))\n\
                  print c.center.x\n\
                  x = c.center.x + 1\n\
                  print x\n";
    assert_eq!(run(source), "7\n8\n");
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(run_err("print 1 / 0").contains("Division by zero"));
}

#[test]
fn divisor_type_is_checked_before_the_dividend() {
    assert!(run_err("print 1 / \"a\"").contains("Divisor must be a number"));
    assert!(run_err("print \"a\" / 1").contains("Cannot use /"));
}

#[test]
fn unsupported_operands_are_errors() {
    assert!(run_err("print 1 + \"a\"").contains("Cannot use +"));
    assert!(run_err("print \"a\" - \"b\"").contains("Cannot use -"));
    assert!(run_err("print True * 2").contains("Cannot use *"));
    assert!(run_err("print None + None").contains("Cannot use +"));
}

#[test]
fn arithmetic_overflow_is_an_error() {
    assert!(run_err("print 9223372036854775807 + 1").contains("overflow"));
    assert!(run_err("print 0 - 9223372036854775807 - 2").contains("overflow"));
}

#[test]
fn unknown_variables_and_fields_are_errors() {
    assert!(run_err("print nope").contains("Unknown variable 'nope'"));
    let source = "class A:\n\
                  \x20 def f():\n\
                  \x20   return 1\n\
                  print A().missing_field\n";
    assert!(run_err(source).contains("Unknown field 'missing_field'"));
}

#[test]
fn field_access_on_non_instances_is_an_error() {
    assert!(run_err("x = 5\nprint x.y").contains("not a class instance"));
    assert!(run_err("x = 5\nx.y = 1").contains("not a class instance"));
}

#[test]
fn incomparable_values_are_errors() {
    assert!(run_err("print 1 < \"a\"").contains("cannot be compared"));
    assert!(run_err("print 1 == \"a\"").contains("cannot be compared"));
    assert!(run_err("print None == 1").contains("cannot be compared"));
    assert!(run_err("print True < 1").contains("cannot be compared"));
}

#[test]
fn errors_in_method_bodies_are_not_swallowed() {
    let source = "class A:\n\
                  \x20 def f():\n\
                  \x20   return 1 / 0\n\
                  print A().f()\n";
    assert!(run_err(source).contains("Division by zero"));
}

#[test]
fn return_outside_a_method_is_rejected() {
    assert!(run_err("return 1").contains("outside"));
    assert!(run_err("if 1:\n  return 1").contains("outside"));
}

#[test]
fn unknown_classes_are_rejected_at_parse_time() {
    assert!(run_err("x = Foo()").contains("Unknown class 'Foo'"));
    let source = "class B(Missing):\n\
                  \x20 def f():\n\
                  \x20   return 1\n";
    assert!(run_err(source).contains("Unknown class 'Missing'"));
}

#[test]
fn syntax_errors_are_reported() {
    assert!(!run_err("print )").is_empty());
    assert!(!run_err("if 1\n  print 1").is_empty());
    assert!(!run_err("class:\n  def f():\n    return 1").is_empty());
    assert!(!run_err("x = ").is_empty());
}

#[test]
fn comparison_chains_are_rejected() {
    assert!(!run_err("print 1 < 2 < 3").is_empty());
}

#[test]
fn oversized_literals_are_lexer_errors() {
    assert!(run_err("print 99999999999999999999").contains("64 bits"));
}

#[test]
fn assignment_rebinds_and_shares() {
    assert_eq!(run("x = 1\nx = x + 1\nprint x"), "2\n");
    assert_eq!(run("x = \"a\"\ny = x\nx = \"b\"\nprint x, y"), "b a\n");
}

#[test]
fn comments_do_not_change_behavior() {
    let source = "# leading comment\n\
                  x = 1 # trailing comment\n\
                  print x # another\n";
    assert_eq!(run(source), "1\n");
}
