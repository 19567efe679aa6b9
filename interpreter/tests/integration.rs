use dicer_interpreter::{ExpandError, expand, prepare, render};

fn run(template: &str, inputs: &[&str]) -> String {
    expand(template, inputs).expect("expansion failed")
}

fn run_err(template: &str, inputs: &[&str]) -> String {
    expand(template, inputs)
        .expect_err("expected expansion to fail")
        .to_string()
}

fn ten() -> Vec<&'static str> {
    vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
}

#[test]
fn simple_expansions() {
    assert_eq!(run("hello %1", &["world"]), "hello world");
    assert_eq!(run("%1 world", &["hello"]), "hello world");
    assert_eq!(run("hello %[1]", &["world"]), "hello world");
    assert_eq!(run("%1 %2", &["hello", "world"]), "hello world");
}

#[test]
fn auto_append_first_input() {
    assert_eq!(run("", &["world"]), "world");
    assert_eq!(run("hello", &["world"]), "hello world");
    assert_eq!(run("%%hello", &["world"]), "%hello world");
    assert_eq!(run("trailing %", &["x"]), "trailing % x");
}

#[test]
fn explicit_reference_disables_auto_append() {
    assert_eq!(run("%2", &["first", "second"]), "second");
    assert_eq!(run("[%[2.1]]", &["first", "a.b"]), "[a]");
}

#[test]
fn multi_character_index() {
    assert_eq!(run("%10", &ten()), "10");
    assert_eq!(run("%[10]", &ten()), "10");
    assert_eq!(run("%10test", &ten()), "10test");
}

#[test]
fn percent_escapes() {
    assert_eq!(run("test%%%1", &["hello"]), "test%hello");
    assert_eq!(run("%%%%%1", &["x"]), "%%x");
    assert_eq!(run("test %1 %", &["a"]), "test a %");
    assert_eq!(run("test %1 %q", &["a"]), "test a %q");
}

#[test]
fn dice_selection() {
    assert_eq!(run("%[1/2]", &["1/2/3"]), "2");
    assert_eq!(run("%[1/2,1]", &["1,a/2,b/3,c"]), "2");
    assert_eq!(run("%[1.$]", &["aa.bb.cc.dd"]), "dd");
}

#[test]
fn dice_selection_out_of_range_is_empty() {
    assert_eq!(run("%[1/4]", &["1/2/3"]), "");
    assert_eq!(run("<%[1/0]>", &["1/2/3"]), "<>");
    // later operations keep working on the empty string
    assert_eq!(run("%[1/9.-1]", &["a/b"]), "");
}

#[test]
fn dice_removal() {
    assert_eq!(run("%[1.-2]", &["aa.bb.cc.dd"]), "aa.cc.dd");
    assert_eq!(run("%[1.-2.-$]", &["aa.bb.cc.dd"]), "aa.cc");
    assert_eq!(run("%[1.-2.-$.-1]", &["aa.bb.cc.dd"]), "cc");
    assert_eq!(run("%[1.-$]", &["aa.bb.cc.dd"]), "aa.bb.cc");
}

#[test]
fn dice_removal_preserves_empty_segments() {
    assert_eq!(run("%[1.-2]z", &["a..c"]), "a.cz");
    assert_eq!(run("%[1.-4]", &["test.example.com."]), "test.example.com");
    assert_eq!(run("%[1.-$]", &["test.example.com."]), "test.example.com");
    assert_eq!(run("%[1.-1]", &["..x.."]), ".x..");
}

#[test]
fn dice_removal_out_of_range_is_noop() {
    assert_eq!(run("%[1.-5]", &["aa.bb.cc.dd"]), "aa.bb.cc.dd");
    assert_eq!(run("%[1.-0]", &["aa.bb"]), "aa.bb");
}

#[test]
fn dice_selection_and_removal() {
    assert_eq!(run("%[1/2.-2]", &["aa.bb.cc/dd.ee.ff"]), "dd.ff");
}

#[test]
fn multibyte_delimiters() {
    assert_eq!(run("%[1→2]", &["a→b→c"]), "b");
    assert_eq!(run("%[1→-1]", &["a→b→c"]), "b→c");
}

#[test]
fn must_be_one_input() {
    assert_eq!(run_err("", &[]), "at least one input must be specified");
    assert_eq!(run_err("%[", &[]), "at least one input must be specified");
    assert_eq!(expand::<&str>("x", &[]), Err(ExpandError::NoInputs));
}

#[test]
fn index_out_of_bounds() {
    assert_eq!(run_err("hello %2", &["a"]), "index 2: out of bounds (inputs size 1)");
    assert_eq!(run_err("%[3/1]", &["a", "b"]), "index 3: out of bounds (inputs size 2)");
    assert_eq!(run_err("%0", &["a"]), "index 0: out of bounds (inputs size 1)");
    assert_eq!(run_err("%[]", &["a"]), "index 0: out of bounds (inputs size 1)");
}

#[test]
fn index_out_of_bounds_carries_placeholder_span() {
    let err = expand("hello %2", &["a"]).unwrap_err();
    assert_eq!(
        err,
        ExpandError::IndexOutOfBounds {
            index: 2,
            size: 1,
            span: 6..8
        }
    );
}

#[test]
fn missing_closing_bracket() {
    assert_eq!(
        run_err("xhello %[1 world", &["hello"]),
        "char 8: dicer expression missing closing ]"
    );
    assert_eq!(run_err("hello %[", &["a"]), "char 7: dicer expression missing closing ]");
    assert!(matches!(
        expand("hello %[", &["a"]),
        Err(ExpandError::UnterminatedExpression { position: 7, .. })
    ));
}

#[test]
fn errors_abort_the_whole_expansion() {
    assert!(expand("%1 %[1.2] %3", &["a.b"]).is_err());
}

#[test]
fn prepared_template_renders_many_inputs() {
    let template = prepare("%[1.2]-%2", 0).expect("prepare failed");
    assert_eq!(render(&template, &["a.b", "c"]).unwrap(), "b-c");
    assert_eq!(render(&template, &["x.y.z", "w"]).unwrap(), "y-w");
    assert_eq!(
        render(&template, &["x"]).unwrap_err().to_string(),
        "index 2: out of bounds (inputs size 1)"
    );
}

#[test]
fn prepare_normalizes() {
    let template = prepare("hello", 0).expect("prepare failed");
    assert_eq!(render(&template, &[String::from("world")]).unwrap(), "hello world");
}

#[test]
fn expansions_run_concurrently() {
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            std::thread::spawn(move || {
                let inputs: Vec<String> = (1..=i).map(|n| n.to_string()).collect();
                expand(&format!("%{}", i), &inputs)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), (i + 1).to_string());
    }
}
