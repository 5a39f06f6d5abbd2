mod array_collection_test;
mod factory_test;
mod index_collection_test;
mod laziness_test;
mod lazy_collection_test;
mod object_collection_test;
mod primitives_test;
mod serialization_test;
