use std::fs;

use rstest::rstest;
use tempfile::TempDir;
use typenames_core::{SuffixName, WatchOptions};
use typenames_renderer::{quote_names, ContentRenderer, RenderError};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("n{i}")).collect()
}

fn ts_renderer() -> ContentRenderer {
    ContentRenderer::builtin(SuffixName::from_suffix(".ts"))
}

#[test]
fn two_names_render_single_line() {
    let content = ts_renderer()
        .render(&quote_names(&["a".to_string(), "b".to_string()]))
        .expect("render");
    assert_eq!(content, "export declare type TSNames =\"a\"|\"b\";\n");
}

#[test]
fn zero_names_leave_the_union_body_empty() {
    let content = ts_renderer().render(&[]).expect("render");
    assert_eq!(content, "export declare type TSNames =;\n");
}

#[test]
fn template_can_opt_into_never_for_empty_union() {
    let source = "export declare type {{ type_name }} =\
        {% if names | length > 0 %}{{ names | join(sep=\"|\") }}{% else %}never{% endif %};";
    let renderer = ContentRenderer::from_template_str(SuffixName::from_suffix(".ts"), source)
        .expect("compile");

    let empty = renderer.render(&[]).expect("render empty");
    assert_eq!(empty.trim_end(), "export declare type TSNames =never;");

    let one = renderer
        .render(&quote_names(&["a".to_string()]))
        .expect("render one");
    assert_eq!(one.trim_end(), "export declare type TSNames =\"a\";");
}

#[rstest]
#[case(1)]
#[case(4)]
fn below_threshold_is_pipe_joined_on_one_line(#[case] count: usize) {
    let content = ts_renderer().render(&quote_names(&names(count))).expect("render");
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with(";\n"));
    assert_eq!(content.matches('|').count(), count - 1);
}

#[rstest]
#[case(5)]
#[case(9)]
fn at_threshold_is_one_name_per_line(#[case] count: usize) {
    let content = ts_renderer().render(&quote_names(&names(count))).expect("render");
    assert!(content.starts_with("export declare type TSNames =\n  | \"n0\""));
    assert_eq!(content.lines().count(), count + 1);
    assert!(content.ends_with(&format!("\n  | \"n{}\";\n", count - 1)));
}

#[test]
fn five_names_exact_layout() {
    let content = ts_renderer().render(&quote_names(&names(5))).expect("render");
    assert_eq!(
        content,
        "export declare type TSNames =\n  | \"n0\"\n  | \"n1\"\n  | \"n2\"\n  | \"n3\"\n  | \"n4\";\n"
    );
}

#[test]
fn suffix_drives_type_name() {
    let content = ContentRenderer::builtin(SuffixName::from_suffix(".svg"))
        .render(&quote_names(&["home".to_string()]))
        .expect("render");
    assert_eq!(content, "export declare type SVGNames =\"home\";\n");
}

#[test]
fn template_file_from_options_renders_context() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("names.tera"),
        "export const {{ suffix_name }}Names = [{% for n in raw_names %}'{{ n }}'{% if not loop.last %}, {% endif %}{% endfor %}] as const;\nexport type {{ type_name }} = {{ names | join(sep=\" | \") }};\n",
    )
    .expect("write template");

    let options = WatchOptions::new("icons", ".svg")
        .with_template("names.tera")
        .resolve(dir.path())
        .expect("resolve");
    let renderer = ContentRenderer::for_options(&options).expect("renderer");
    let content = renderer
        .render(&quote_names(&["home".to_string(), "user".to_string()]))
        .expect("render");

    assert!(content.contains("export const svgNames = ['home', 'user'] as const;"));
    assert!(content.contains("export type SVGNames = \"home\" | \"user\";"));
}

#[test]
fn missing_template_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let options = WatchOptions::new("icons", ".svg")
        .with_template("missing.tera")
        .resolve(dir.path())
        .expect("resolve");
    let err = ContentRenderer::for_options(&options).expect_err("must fail");
    assert!(matches!(err, RenderError::Io { .. }));
}

#[test]
fn template_referencing_unknown_variable_fails_at_render() {
    let renderer =
        ContentRenderer::from_template_str(SuffixName::from_suffix(".ts"), "{{ nope }}")
            .expect("compile");
    let err = renderer.render(&[]).expect_err("must fail");
    assert!(matches!(err, RenderError::Tera(_)));
}
