mod check;
pub use check::CheckError;
pub use check::Checker;
pub use check::Summary;
pub use check::Violation;

mod counter;
pub use counter::OrderCounter;

mod generator;
pub use generator::Draw;
pub use generator::Generator;
pub use generator::QueryKind;
pub use generator::Stats;

mod params;
pub use params::Params;
pub use params::ParamsError;

mod policy;
pub use policy::OnEmpty;
pub use policy::Policy;
pub use policy::Recancel;

mod registry;
pub use registry::OrdersByClient;
