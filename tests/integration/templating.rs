//! Rendering resolved values.

use txtplate::config::RenderConfig;
use txtplate::test_utils::TestProject;
use txtplate::values::resolve_values;
use txtplate::{cli::render, templating::TemplateRenderer};

#[test]
fn test_render_merged_values() {
    let project = TestProject::new().unwrap();
    let base = project
        .create_file("base.yaml", "service:\n  name: api\n  hosts: [a, b]\ndebug: false\n")
        .unwrap();
    let prod = project.create_file("prod.json", r#"{"service": {"hosts": ["p1", "p2", "p3"]}}"#).unwrap();

    let values = resolve_values(&[base, prod]).unwrap();
    let template = "{{ service.name }}:{% for h in service.hosts %} {{ h }}{% endfor %}\
{% if debug %} [debug]{% endif %}";

    let out = TemplateRenderer::new().render(template, &values).unwrap();
    assert_eq!(out, "api: p1 p2 p3");
}

#[test]
fn test_run_pipeline_with_template_file() {
    let project = TestProject::new().unwrap();
    let values = project.create_file("values.json", r#"{"user": {"name": "ada"}}"#).unwrap();
    let input = project.create_file("greeting.tpl", "Hi {{ user.name | capitalize }}\n").unwrap();
    let output = project.path().join("greeting.txt");

    let config = RenderConfig::new(vec![values]).with_input(&input).with_output(&output);
    render::run(&config, std::io::empty(), std::io::sink()).unwrap();

    assert_eq!(project.read_file("greeting.txt").unwrap(), "Hi Ada\n");
}

#[test]
fn test_template_syntax_error_writes_nothing() {
    let project = TestProject::new().unwrap();
    let values = project.create_file("values.json", "{}").unwrap();
    let output = project.path().join("out.txt");

    let config = RenderConfig::new(vec![values]).with_output(&output);
    let result = render::run(&config, "{% if %}".as_bytes(), std::io::sink());

    assert!(result.is_err());
    assert!(!project.file_exists("out.txt"));
}
