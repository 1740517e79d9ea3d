//! Java fact extraction via tree-sitter.
//!
//! Walks the syntax tree of one file and produces a [`TypeEntry`] for each
//! class, interface, or enum declaration, plus every method-call expression
//! found inside method bodies. Nested type declarations become their own
//! entries; their members are never attributed to the enclosing type.
//!
//! A file whose tree contains syntax errors degrades to a single empty stub
//! entry named after the file stem, so a broken file stays visible in the
//! model without contributing structure any detector could match on.

use super::{CallSite, ParsedFile};
use crate::errors::{AnalysisError, Result};
use crate::model::{ConstructorInfo, FieldInfo, LocalVariable, MethodInfo, Parameter, TypeEntry};
use std::path::Path;
use tracing::warn;
use tree_sitter::{Node, Parser};

pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| AnalysisError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse a file from disk.
    ///
    /// Only an unreadable file is an error; a readable file with syntax
    /// errors yields a stub entry and `failed = true`.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.parse_source(&source, &stem, path))
    }

    /// Parse source text. `stem` names the stub entry on failure.
    pub fn parse_source(&mut self, source: &str, stem: &str, path: &Path) -> ParsedFile {
        let tree = self.parser.parse(source, None);
        let root = match &tree {
            Some(tree) if !tree.root_node().has_error() => tree.root_node(),
            _ => {
                warn!("skipping file due to parse error: {}", path.display());
                return ParsedFile {
                    path: path.to_path_buf(),
                    types: vec![TypeEntry::stub(stem)],
                    calls: Vec::new(),
                    failed: true,
                };
            }
        };

        let mut types = Vec::new();
        let mut calls = Vec::new();
        collect_types(root, source, &mut types, &mut calls);

        ParsedFile {
            path: path.to_path_buf(),
            types,
            calls,
            failed: false,
        }
    }
}

/// Recursively find type declarations anywhere under `node`.
fn collect_types(node: Node, source: &str, types: &mut Vec<TypeEntry>, calls: &mut Vec<CallSite>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "class_declaration" | "interface_declaration" | "enum_declaration" => {
                if let Some(entry) = extract_type(child, source, calls) {
                    types.push(entry);
                }
                // nested declarations live inside the body
                if let Some(body) = child.child_by_field_name("body") {
                    collect_types(body, source, types, calls);
                }
            }
            _ => collect_types(child, source, types, calls),
        }
    }
}

fn extract_type(node: Node, source: &str, calls: &mut Vec<CallSite>) -> Option<TypeEntry> {
    let name = text(node.child_by_field_name("name")?, source);
    let mut entry = TypeEntry::new(&name);
    entry.is_interface = node.kind() == "interface_declaration";

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "modifiers" => {
                entry.modifiers = modifier_tokens(child, source);
                entry.is_abstract = entry.modifiers.iter().any(|m| m == "abstract");
            }
            // class X extends Y
            "superclass" => {
                if let Some(ty) = child.named_child(child.named_child_count().saturating_sub(1)) {
                    entry.extends.push(base_type_name(ty, source));
                }
            }
            // class X implements A, B  /  enum X implements A
            "super_interfaces" => {
                entry.implements.extend(type_list_names(child, source));
            }
            // interface X extends A, B
            "extends_interfaces" => {
                entry.extends.extend(type_list_names(child, source));
            }
            _ => {}
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        extract_members(body, source, &mut entry, calls);
    }

    Some(entry)
}

fn extract_members(body: Node, source: &str, entry: &mut TypeEntry, calls: &mut Vec<CallSite>) {
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "field_declaration" => {
                if let Some(field) = extract_field(member, source) {
                    entry.fields.push(field);
                }
            }
            "constructor_declaration" => {
                entry.constructors.push(extract_constructor(member, source));
                if let Some(ctor_body) = member.child_by_field_name("body") {
                    collect_locals(ctor_body, source, &mut entry.locals);
                }
            }
            "method_declaration" => {
                let method = extract_method(member, source);
                if let Some(method_body) = member.child_by_field_name("body") {
                    collect_locals(method_body, source, &mut entry.locals);
                    collect_calls(method_body, source, &entry.name, &method.name, calls);
                }
                entry.methods.push(method);
            }
            // enum members sit one level deeper
            "enum_body_declarations" => extract_members(member, source, entry, calls),
            _ => {}
        }
    }
}

fn extract_field(node: Node, source: &str) -> Option<FieldInfo> {
    let ty = text(node.child_by_field_name("type")?, source);
    let mut field = FieldInfo::new(ty);

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "modifiers" => field.modifiers = modifier_tokens(child, source),
            "variable_declarator" => {
                if let Some(name) = child.child_by_field_name("name") {
                    field.declarators.push(text(name, source));
                }
            }
            _ => {}
        }
    }
    Some(field)
}

fn extract_constructor(node: Node, source: &str) -> ConstructorInfo {
    let mut ctor = ConstructorInfo::new(&[]);
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "modifiers" {
            ctor.modifiers = modifier_tokens(child, source);
        }
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        ctor.parameters = extract_parameters(params, source);
    }
    ctor
}

fn extract_method(node: Node, source: &str) -> MethodInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let return_type = node
        .child_by_field_name("type")
        .map(|n| text(n, source))
        .unwrap_or_default();

    let mut method = MethodInfo::new(name, return_type);
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "modifiers" {
            method.modifiers = modifier_tokens(child, source);
            method.is_override = has_override_annotation(child, source);
        }
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        method.parameters = extract_parameters(params, source);
    }
    method
}

fn extract_parameters(node: Node, source: &str) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let mut cursor = node.walk();
    for param in node.named_children(&mut cursor) {
        if param.kind() != "formal_parameter" && param.kind() != "spread_parameter" {
            continue;
        }
        let ty = param
            .child_by_field_name("type")
            .map(|n| text(n, source))
            .unwrap_or_default();
        let name = param
            .child_by_field_name("name")
            .map(|n| text(n, source))
            .unwrap_or_default();
        parameters.push(Parameter::new(ty, name));
    }
    parameters
}

fn collect_locals(body: Node, source: &str, locals: &mut Vec<LocalVariable>) {
    for_each_descendant(body, &mut |node| {
        if node.kind() == "local_variable_declaration" {
            let ty = node
                .child_by_field_name("type")
                .map(|n| text(n, source))
                .unwrap_or_default();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "variable_declarator" {
                    if let Some(name) = child.child_by_field_name("name") {
                        locals.push(LocalVariable {
                            declared_type: ty.clone(),
                            name: text(name, source),
                        });
                    }
                }
            }
        }
    });
}

fn collect_calls(
    body: Node,
    source: &str,
    caller_class: &str,
    caller_method: &str,
    calls: &mut Vec<CallSite>,
) {
    for_each_descendant(body, &mut |node| {
        if node.kind() == "method_invocation" {
            let receiver = node.child_by_field_name("object").map(|n| text(n, source));
            let method_name = node
                .child_by_field_name("name")
                .map(|n| text(n, source))
                .unwrap_or_default();
            calls.push(CallSite {
                caller_class: caller_class.to_string(),
                caller_method: caller_method.to_string(),
                receiver,
                method_name,
            });
        }
    });
}

fn for_each_descendant<'a>(node: Node<'a>, visit: &mut impl FnMut(Node<'a>)) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child);
        for_each_descendant(child, visit);
    }
}

/// Keyword modifiers of a `modifiers` node, annotations excluded.
fn modifier_tokens(node: Node, source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "marker_annotation" | "annotation" => {}
            _ => tokens.push(text(child, source)),
        }
    }
    tokens
}

fn has_override_annotation(modifiers: Node, source: &str) -> bool {
    let mut cursor = modifiers.walk();
    for child in modifiers.children(&mut cursor) {
        if matches!(child.kind(), "marker_annotation" | "annotation") {
            if let Some(name) = child.child_by_field_name("name") {
                if text(name, source) == "Override" {
                    return true;
                }
            }
        }
    }
    false
}

/// The base name of a (possibly generic or qualified) type node.
fn base_type_name(node: Node, source: &str) -> String {
    match node.kind() {
        "generic_type" => node
            .named_child(0)
            .map(|n| base_type_name(n, source))
            .unwrap_or_default(),
        "scoped_type_identifier" => node
            .named_child(node.named_child_count().saturating_sub(1))
            .map(|n| text(n, source))
            .unwrap_or_default(),
        _ => text(node, source),
    }
}

/// Base names of the types in a `super_interfaces`/`extends_interfaces` node.
fn type_list_names(node: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut inner = child.walk();
            for ty in child.named_children(&mut inner) {
                names.push(base_type_name(ty, source));
            }
        }
    }
    names
}

fn text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}
