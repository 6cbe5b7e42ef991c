pub mod year_2018;
