pub mod estrada;
pub mod feature;
pub mod survey;
