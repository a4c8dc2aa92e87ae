//! Depth-first traversal over statements, expressions and type names.
//!
//! Implementors override the hooks they care about and call the matching
//! `walk_*` function to keep descending. Every node handed to a hook carries
//! its own range, so a visitor can decide purely by span what is relevant.

use super::ast::*;

pub trait Visitor {
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_type_name(&mut self, ty: &TypeName) {
        walk_type_name(self, ty);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration) {
        self.visit_type_name(&decl.ty);
    }

    fn visit_parameter(&mut self, param: &Parameter) {
        self.visit_type_name(&param.ty);
    }
}

pub fn walk_block<V: Visitor + ?Sized>(v: &mut V, block: &Block) {
    for stmt in &block.statements {
        v.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Statement) {
    match &stmt.kind {
        StatementKind::Block(block) => v.visit_block(block),
        StatementKind::VariableDeclaration {
            declarations,
            initializer,
        } => {
            for decl in declarations.iter().flatten() {
                v.visit_variable_declaration(decl);
            }
            if let Some(init) = initializer {
                v.visit_expr(init);
            }
        }
        StatementKind::Expression(expr)
        | StatementKind::Emit(expr)
        | StatementKind::Revert(expr) => v.visit_expr(expr),
        StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            v.visit_expr(condition);
            v.visit_statement(then_branch);
            if let Some(else_branch) = else_branch {
                v.visit_statement(else_branch);
            }
        }
        StatementKind::For {
            init,
            condition,
            update,
            body,
        } => {
            if let Some(init) = init {
                v.visit_statement(init);
            }
            if let Some(condition) = condition {
                v.visit_expr(condition);
            }
            if let Some(update) = update {
                v.visit_expr(update);
            }
            v.visit_statement(body);
        }
        StatementKind::While { condition, body } | StatementKind::DoWhile { body, condition } => {
            v.visit_expr(condition);
            v.visit_statement(body);
        }
        StatementKind::Return(expr) => {
            if let Some(expr) = expr {
                v.visit_expr(expr);
            }
        }
        StatementKind::Try {
            expr,
            returns,
            body,
            catches,
        } => {
            v.visit_expr(expr);
            for param in returns {
                v.visit_parameter(param);
            }
            v.visit_block(body);
            for catch in catches {
                for param in &catch.params {
                    v.visit_parameter(param);
                }
                v.visit_block(&catch.body);
            }
        }
        StatementKind::Assembly | StatementKind::Break | StatementKind::Continue => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Ident(_) | ExprKind::Literal(_) => {}
        ExprKind::ElementaryType(ty) | ExprKind::New(ty) => v.visit_type_name(ty),
        ExprKind::Member { base, .. } => v.visit_expr(base),
        ExprKind::Index { base, index } => {
            v.visit_expr(base);
            if let Some(index) = index {
                v.visit_expr(index);
            }
        }
        ExprKind::Slice { base, start, end } => {
            v.visit_expr(base);
            for part in [start, end].into_iter().flatten() {
                v.visit_expr(part);
            }
        }
        ExprKind::Call { callee, args } => {
            v.visit_expr(callee);
            for arg in args.exprs() {
                v.visit_expr(arg);
            }
        }
        ExprKind::CallOptions { callee, options } => {
            v.visit_expr(callee);
            for option in options {
                v.visit_expr(&option.value);
            }
        }
        ExprKind::Unary { operand, .. } => v.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } | ExprKind::Assign { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            v.visit_expr(condition);
            v.visit_expr(then_expr);
            v.visit_expr(else_expr);
        }
        ExprKind::Tuple(items) => {
            for item in items.iter().flatten() {
                v.visit_expr(item);
            }
        }
        ExprKind::Array(items) => {
            for item in items {
                v.visit_expr(item);
            }
        }
    }
}

pub fn walk_type_name<V: Visitor + ?Sized>(v: &mut V, ty: &TypeName) {
    match &ty.kind {
        TypeNameKind::Elementary { .. } | TypeNameKind::UserDefined(_) => {}
        TypeNameKind::Mapping { key, value, .. } => {
            v.visit_type_name(key);
            v.visit_type_name(value);
        }
        TypeNameKind::Array { base, size } => {
            v.visit_type_name(base);
            if let Some(size) = size {
                v.visit_expr(size);
            }
        }
        TypeNameKind::Function {
            params, returns, ..
        } => {
            for param in params.iter().chain(returns) {
                v.visit_parameter(param);
            }
        }
    }
}
