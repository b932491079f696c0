pub mod stereogram;
