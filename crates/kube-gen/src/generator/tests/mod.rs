mod cycles;
mod support;
mod type_factory;
