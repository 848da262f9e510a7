use super::{
    ast::{AstNode, NodeType},
    expressions::{BinaryOp, UnaryOp},
    statements::AstSeq,
};

fn var(name: &str) -> AstNode {
    AstNode::variable(name.as_bytes().into())
}

fn sample_program() -> AstNode {
    let mut then_body = AstSeq::new();
    then_body
        .push(AstNode::assign(
            var("title"),
            AstNode::string(b"adult"[..].into()),
        ))
        .unwrap();

    let mut body = AstSeq::new();
    body.push(AstNode::if_stmt(
        AstNode::binary(BinaryOp::Gte, var("age"), AstNode::number(18)),
        AstNode::block(then_body),
    ))
    .unwrap();

    AstNode::program(body)
}

#[test]
fn test_node_types_and_labels() {
    let not = AstNode::unary(UnaryOp::LogicalNot, AstNode::boolean(true));
    assert_eq!(not.get_node_type(), NodeType::Unary);
    assert_eq!(not.label(), "LogicalNot");

    let minus = AstNode::unary(UnaryOp::Minus, AstNode::number(1));
    assert_eq!(minus.label(), "UnaryMinus");

    let modulus = AstNode::binary(BinaryOp::Mod, AstNode::number(7), AstNode::number(2));
    assert_eq!(modulus.get_node_type(), NodeType::Binary);
    assert_eq!(modulus.label(), "BinaryModulus");

    assert_eq!(BinaryOp::Neq.label(), "RelationalNeq");
    assert_eq!(BinaryOp::LogicalOr.to_string(), "LogicalOr");
}

#[test]
fn test_children_and_count() {
    let program = sample_program();

    assert_eq!(program.children().len(), 1);
    assert_eq!(program.body().map(|body| body.len()), Some(1));
    // Program, If, Gte, age, 18, Block, Assignment, title, "adult"
    assert_eq!(program.count(), 9);
    assert!(AstNode::number(3).children().is_empty());
    assert!(AstNode::number(3).body().is_none());
}

#[test]
fn test_dump_indents_children() {
    let program = sample_program();

    let expected = "\
<Program>
  <If>
    <RelationalGte>
      <Variable \"age\">
      <NumericLiteral 18>
    <Block>
      <Assignment>
        <Variable \"title\">
        <StringLiteral \"adult\">
";
    assert_eq!(program.dump(2), expected);
}

#[test]
fn test_dump_escapes_strings() {
    let node = AstNode::string(b"say \"hi\"\n"[..].into());
    assert_eq!(node.dump(4), "<StringLiteral \"say \\\"hi\\\"\\n\">\n");
}

#[test]
fn test_single_line_display() {
    let node = AstNode::if_else_stmt(
        AstNode::boolean(false),
        AstNode::block(AstSeq::new()),
        AstNode::block(AstSeq::new()),
    );

    assert_eq!(
        node.to_string(),
        "<IfElse <BooleanLiteral false> <Block> <Block>>"
    );
}

#[test]
fn test_ast_seq_dump() {
    let mut seq = AstSeq::new();
    assert_eq!(seq.dump(None), "<AstSeq(0): []>");

    seq.push(AstNode::number(1)).unwrap();
    seq.push(var("x")).unwrap();

    assert_eq!(
        seq.dump(None),
        "<AstSeq(2): [<NumericLiteral 1>, <Variable \"x\">]>"
    );
    assert_eq!(
        seq.dump(Some(2)),
        "<AstSeq(2): [\n  <NumericLiteral 1>,\n  <Variable \"x\">\n]>"
    );
    assert_eq!(seq[1], var("x"));
}
