pub mod likeminds;
