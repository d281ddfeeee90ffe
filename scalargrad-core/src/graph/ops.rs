//! `std::ops` overloads for [`Var`]: `a + b`, `a - b`, `a * b`, `a / b`, `-a`.
//!
//! Each operator also accepts a plain `f64` on either side, which is wrapped as a
//! constant node first.

use super::Var;
use crate::autograd::operator::Operator;
use std::ops::{Add, Div, Mul, Neg, Sub};

fn add<'g>(a: Var<'g>, b: Var<'g>) -> Var<'g> {
    a.binary(b, a.value() + b.value(), Operator::Add(a.id(), b.id()))
}

fn mul<'g>(a: Var<'g>, b: Var<'g>) -> Var<'g> {
    a.binary(b, a.value() * b.value(), Operator::Mul(a.id(), b.id()))
}

fn negate(a: Var<'_>) -> Var<'_> {
    mul(a, a.graph().constant(-1.0))
}

fn subtract<'g>(a: Var<'g>, b: Var<'g>) -> Var<'g> {
    add(a, negate(b))
}

fn divide<'g>(a: Var<'g>, b: Var<'g>) -> Var<'g> {
    mul(a, b.pow(-1.0))
}

impl<'g> Add for Var<'g> {
    type Output = Var<'g>;

    fn add(self, rhs: Var<'g>) -> Var<'g> {
        add(self, rhs)
    }
}

impl<'g> Sub for Var<'g> {
    type Output = Var<'g>;

    fn sub(self, rhs: Var<'g>) -> Var<'g> {
        subtract(self, rhs)
    }
}

impl<'g> Mul for Var<'g> {
    type Output = Var<'g>;

    fn mul(self, rhs: Var<'g>) -> Var<'g> {
        mul(self, rhs)
    }
}

impl<'g> Div for Var<'g> {
    type Output = Var<'g>;

    fn div(self, rhs: Var<'g>) -> Var<'g> {
        divide(self, rhs)
    }
}

impl<'g> Neg for Var<'g> {
    type Output = Var<'g>;

    fn neg(self) -> Var<'g> {
        negate(self)
    }
}

// Mixed `Var`/`f64` operands, in both positions.
macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<'g> $trait<f64> for Var<'g> {
            type Output = Var<'g>;

            fn $method(self, rhs: f64) -> Var<'g> {
                $op(self, self.graph().constant(rhs))
            }
        }

        impl<'g> $trait<Var<'g>> for f64 {
            type Output = Var<'g>;

            fn $method(self, rhs: Var<'g>) -> Var<'g> {
                $op(rhs.graph().constant(self), rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add, add);
impl_scalar_op!(Sub, sub, subtract);
impl_scalar_op!(Mul, mul, mul);
impl_scalar_op!(Div, div, divide);
